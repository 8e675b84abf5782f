//! Verse corpus loading.
//!
//! A corpus is a JSON file of verses. The loader accepts several layouts
//! (see [`Corpus::from_json`]) and normalises every element into a
//! [`Verse`] whose `text` is the string that gets embedded.
//!
//! # Example
//!
//! ```no_run
//! use shloka_core::corpus::Corpus;
//!
//! let corpus = Corpus::load("assets/bhagavadgita_Chapter_18.json")?;
//! println!("{} verses", corpus.len());
//! # Ok::<(), shloka_core::error::CorpusError>(())
//! ```

mod loader;
pub mod types;

pub use types::{Verse, UNKNOWN_LABEL};

use crate::error::CorpusError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Verses loaded from one source, in file order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    source: PathBuf,
    verses: Vec<Verse>,
}

impl Corpus {
    /// Reads and parses a corpus file.
    ///
    /// # Errors
    ///
    /// - `CorpusError::NotFound` if the file does not exist
    /// - `CorpusError::Io` if it cannot be read
    /// - `CorpusError::InvalidJson` if it is not valid JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CorpusError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Value = serde_json::from_slice(&bytes)
            .map_err(|e| CorpusError::InvalidJson(path.to_path_buf(), e.to_string()))?;

        let corpus = Self::from_json(data, path);
        if corpus.is_empty() {
            warn!("No verses found in {}", path.display());
        } else {
            info!("Loaded {} verses from {}", corpus.len(), path.display());
        }
        Ok(corpus)
    }

    /// Builds a corpus from already-parsed JSON.
    ///
    /// Layouts are tried in order: a top-level array, an object with a
    /// `verses` array, an object with a `chapters` array, and finally an
    /// object keyed by chapter whose `verses` map verse labels to text.
    pub fn from_json(data: Value, source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            verses: loader::extract_verses(data),
        }
    }

    /// Builds a corpus from verses constructed in code.
    pub fn from_verses(verses: Vec<Verse>) -> Self {
        Self {
            source: PathBuf::new(),
            verses,
        }
    }

    /// Path the corpus was loaded from (empty for in-memory corpora).
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// All verses in corpus order.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Verse at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Verse> {
        self.verses.get(index)
    }

    /// Text of every verse, in corpus order. This is the embedding input.
    pub fn texts(&self) -> Vec<String> {
        self.verses.iter().map(|v| v.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_corpus(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let result = Corpus::load("/nonexistent/corpus.json");
        assert!(matches!(result, Err(CorpusError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_corpus("{not json");
        let result = Corpus::load(file.path());
        assert!(matches!(result, Err(CorpusError::InvalidJson(_, _))));
    }

    #[test]
    fn test_load_array() {
        let file = write_corpus(r#"[{"chapter": 18, "verse": 66, "text": "sarva-dharman"}]"#);
        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.source(), file.path());
        assert_eq!(corpus.texts(), vec!["sarva-dharman".to_string()]);
        assert_eq!(corpus.get(0).unwrap().verse_label(), "66");
    }

    #[test]
    fn test_load_unrecognised_layout_is_empty_not_error() {
        let file = write_corpus(r#"{"title": "Gita"}"#);
        let corpus = Corpus::load(file.path()).unwrap();
        assert!(corpus.is_empty());
    }
}
