//! Search command implementation.
//!
//! Loads the corpus and embedding model, embeds the corpus once, and answers
//! queries against it.

use crate::config::{self, FileAssetLoader};
use anyhow::{anyhow, Context, Result};
use shloka_core::corpus::Corpus;
use shloka_core::embedding::{BertConfig, SentenceEncoder};
use shloka_core::search::{VerseMatch, VerseSearchEngine};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Search engine backed by the on-disk sentence encoder.
pub type Engine = VerseSearchEngine<SentenceEncoder>;

/// Builds the search engine.
///
/// This function:
/// 1. Resolves and loads the corpus JSON
/// 2. Resolves and loads the tokenizer and model weights
/// 3. Embeds every verse
pub async fn load_engine(
    corpus_path: Option<&PathBuf>,
    model_dir: Option<&PathBuf>,
) -> Result<Engine> {
    // 1. Corpus
    let corpus_path = config::find_corpus(corpus_path)?;
    let corpus = Corpus::load(&corpus_path)
        .with_context(|| format!("Failed to load corpus: {}", corpus_path.display()))?;

    // 2. Model
    let model_dir = config::find_model_dir(model_dir)?;
    info!("Loading embedding model from {}", model_dir.display());
    let loader = FileAssetLoader::new(model_dir);
    let encoder = SentenceEncoder::load(&loader, BertConfig::default())
        .await
        .map_err(|e| anyhow!("Failed to load embedding model: {}", e))?;

    // 3. Embed corpus
    let start = Instant::now();
    let engine = VerseSearchEngine::build(corpus, encoder)
        .map_err(|e| anyhow!("Failed to embed corpus: {}", e))?;
    info!(
        "Indexed {} verses in {:.2?}",
        engine.len(),
        start.elapsed()
    );

    Ok(engine)
}

/// Runs one query.
pub fn execute_search(engine: &Engine, query: &str, top_k: usize) -> Result<Vec<VerseMatch>> {
    info!("Searching for: \"{}\"", query);
    let results = engine
        .retrieve(query, top_k)
        .map_err(|e| anyhow!("Search failed: {}", e))?;
    info!("Found {} verses", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_corpus() {
        let missing = PathBuf::from("/nonexistent/corpus.json");
        let err = load_engine(Some(&missing), None)
            .await
            .err()
            .expect("missing corpus should fail");
        let message = format!("{:#}", err);
        assert!(message.contains("JSON file not found"), "{}", message);
    }

    #[tokio::test]
    async fn test_load_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.json");
        std::fs::write(&corpus, r#"["verse"]"#).unwrap();
        let model_dir = dir.path().join("models");

        let err = load_engine(Some(&corpus), Some(&model_dir))
            .await
            .err()
            .expect("missing model should fail");
        assert!(err.to_string().contains("must contain"));
    }
}
