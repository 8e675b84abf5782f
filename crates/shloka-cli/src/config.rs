//! Configuration and path resolution for the CLI.
//!
//! Handles finding model files and the verse corpus across different environments:
//! - Development: workspace assets directory
//! - Distribution: relative to executable
//! - Custom: command-line flags and environment variables

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use shloka_core::config::{
    CORPUS_FILENAME, MODEL_CONFIG_FILENAME, MODEL_FILENAME, TOKENIZER_FILENAME,
};
use shloka_core::embedding::AssetLoader;
use std::path::{Path, PathBuf};

/// Environment variable for custom model directory
const MODEL_DIR_ENV: &str = "SHLOKA_MODEL_DIR";

/// Environment variable for custom corpus file
const CORPUS_ENV: &str = "SHLOKA_CORPUS";

/// Workspace root (two levels above this crate's manifest).
fn workspace_root() -> Option<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

fn has_model_files(dir: &Path) -> bool {
    [MODEL_FILENAME, TOKENIZER_FILENAME, MODEL_CONFIG_FILENAME]
        .iter()
        .all(|name| dir.join(name).exists())
}

/// Finds the directory holding `model.safetensors`, `tokenizer.json` and `config.json`.
///
/// Search order:
/// 1. `--model-dir` flag
/// 2. `$SHLOKA_MODEL_DIR` environment variable
/// 3. Workspace `assets/models/` directory (development)
/// 4. Executable-relative `../assets/models/` and `assets/models/` (distribution)
pub fn find_model_dir(custom_dir: Option<&PathBuf>) -> Result<PathBuf> {
    // 1. Explicit flag: no fallback, report what is missing
    if let Some(dir) = custom_dir {
        if has_model_files(dir) {
            return Ok(dir.clone());
        }
        return Err(anyhow!(
            "Model directory {} must contain {}, {} and {}",
            dir.display(),
            MODEL_FILENAME,
            TOKENIZER_FILENAME,
            MODEL_CONFIG_FILENAME
        ));
    }

    // 2. Environment variable
    if let Ok(dir) = std::env::var(MODEL_DIR_ENV) {
        let path = PathBuf::from(dir);
        if has_model_files(&path) {
            return Ok(path);
        }
    }

    // 3. Workspace assets (development)
    let workspace_path = workspace_root().map(|p| p.join("assets/models"));
    if let Some(ref path) = workspace_path {
        if has_model_files(path) {
            return Ok(path.clone());
        }
    }

    // 4. Relative to executable (distribution)
    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            for candidate in [exe_dir.join("../assets/models"), exe_dir.join("assets/models")] {
                if has_model_files(&candidate) {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(anyhow!(
        "Model files not found. Download {} from Hugging Face \
         (model.safetensors, tokenizer.json, config.json).\n\
         Searched locations:\n\
         - ${} environment variable\n\
         - {}\n\
         - Relative to executable",
        shloka_core::config::DEFAULT_MODEL_ID,
        MODEL_DIR_ENV,
        workspace_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<workspace>/assets/models".to_string())
    ))
}

/// Returns the platform data directory.
///
/// - macOS: `~/Library/Application Support/org.shloka.Shloka/`
/// - Linux: `~/.local/share/shloka/`
/// - Windows: `%APPDATA%\shloka\Shloka\data\`
pub fn get_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("org", "shloka", "Shloka")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Finds the corpus JSON file.
///
/// Search order:
/// 1. `--corpus` flag (returned as-is; the loader reports a missing file)
/// 2. `$SHLOKA_CORPUS` environment variable
/// 3. Workspace `assets/bhagavadgita_Chapter_18.json`
/// 4. Platform data directory
pub fn find_corpus(custom_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        return Ok(path.clone());
    }

    if let Ok(path) = std::env::var(CORPUS_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = workspace_root().map(|p| p.join("assets").join(CORPUS_FILENAME)) {
        if path.exists() {
            return Ok(path);
        }
    }

    let data_path = get_data_dir()?.join(CORPUS_FILENAME);
    if data_path.exists() {
        return Ok(data_path);
    }

    Err(anyhow!(
        "Corpus not found. Pass --corpus, set ${}, or place {} in {}",
        CORPUS_ENV,
        CORPUS_FILENAME,
        data_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    ))
}

/// Reads model assets from a directory on disk.
pub struct FileAssetLoader {
    dir: PathBuf,
}

impl FileAssetLoader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl AssetLoader for FileAssetLoader {
    async fn load_model_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.join(MODEL_FILENAME)).await
    }

    async fn load_tokenizer_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.join(TOKENIZER_FILENAME)).await
    }

    async fn load_config_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.join(MODEL_CONFIG_FILENAME)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_model_files(dir: &Path) {
        for name in [MODEL_FILENAME, TOKENIZER_FILENAME, MODEL_CONFIG_FILENAME] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
    }

    #[test]
    fn test_custom_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_model_files(dir.path());
        let custom = dir.path().to_path_buf();
        assert_eq!(find_model_dir(Some(&custom)).unwrap(), custom);
    }

    #[test]
    fn test_custom_model_dir_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILENAME), b"x").unwrap();
        let err = find_model_dir(Some(&dir.path().to_path_buf()))
            .unwrap_err()
            .to_string();
        assert!(err.contains(TOKENIZER_FILENAME));
    }

    #[test]
    fn test_custom_corpus_returned_as_is() {
        let custom = PathBuf::from("/tmp/custom-corpus.json");
        assert_eq!(find_corpus(Some(&custom)).unwrap(), custom);
    }

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        let dir_str = dir.to_string_lossy().to_lowercase();
        assert!(
            dir_str.contains("shloka"),
            "Data dir should use project name: {}",
            dir_str
        );
    }

    #[tokio::test]
    async fn test_file_asset_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_CONFIG_FILENAME), b"{}").unwrap();
        let loader = FileAssetLoader::new(dir.path().to_path_buf());

        assert_eq!(loader.load_config_bytes().await.unwrap(), b"{}".to_vec());
        assert!(loader.load_model_bytes().await.is_err());
    }
}
