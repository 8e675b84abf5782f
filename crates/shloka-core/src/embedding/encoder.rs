//! Text-to-vector pipeline: tokenizer plus token-level model.

use super::config::BertConfig;
use super::model::BertEmbedder;
use super::tokenizer::TokenizerHandle;
use super::traits::{AssetLoader, Embedder, ModelConfig, TextEmbedder};
use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::EmbeddingError;
use tracing::{debug, info};

/// Sentence encoder combining a tokenizer with an [`Embedder`].
///
/// Texts are tokenized one by one and sent to the model in batches of
/// `batch_size`.
pub struct SentenceEncoder<E: Embedder = BertEmbedder> {
    tokenizer: TokenizerHandle,
    embedder: E,
    batch_size: usize,
}

impl<E: Embedder> SentenceEncoder<E> {
    /// Pairs a tokenizer with a model.
    pub fn new(tokenizer: TokenizerHandle, embedder: E) -> Self {
        Self {
            tokenizer,
            embedder,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the number of texts per forward pass (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn tokenizer(&self) -> &TokenizerHandle {
        &self.tokenizer
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl SentenceEncoder<BertEmbedder> {
    /// Loads tokenizer, architecture and weights through `loader`.
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingError::ModelLoad` if an asset cannot be read, or any
    /// error from tokenizer and model construction.
    pub async fn load(
        loader: &dyn AssetLoader,
        overrides: BertConfig,
    ) -> Result<Self, EmbeddingError> {
        let config_bytes = loader
            .load_config_bytes()
            .await
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to read config: {}", e)))?;
        let tokenizer_bytes = loader
            .load_tokenizer_bytes()
            .await
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to read tokenizer: {}", e)))?;
        let model_bytes = loader
            .load_model_bytes()
            .await
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to read weights: {}", e)))?;

        let embedder = BertEmbedder::from_bytes(model_bytes, &config_bytes, overrides)?;
        let tokenizer =
            TokenizerHandle::from_bytes(tokenizer_bytes, embedder.config().max_sequence_length())?;

        info!(
            "Sentence encoder ready ({}d, vocab {})",
            embedder.embedding_dim(),
            tokenizer.vocab_size()
        );
        Ok(Self::new(tokenizer, embedder))
    }
}

impl<E: Embedder> TextEmbedder for SentenceEncoder<E> {
    fn embedding_dim(&self) -> usize {
        self.embedder.embedding_dim()
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let tokens = self.tokenizer.tokenize(text)?;
        self.embedder.embed_tokens(tokens)
    }

    fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for (batch_index, batch) in texts.chunks(self.batch_size).enumerate() {
            let tokens = batch
                .iter()
                .map(|text| self.tokenizer.tokenize(text))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("Embedding batch {} ({} texts)", batch_index, batch.len());
            embeddings.extend(self.embedder.embed_batch_tokens(tokens)?);
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{word_level_tokenizer_json, CountingEmbedder};

    fn encoder(batch_size: usize) -> SentenceEncoder<CountingEmbedder> {
        let tokenizer =
            TokenizerHandle::from_bytes(word_level_tokenizer_json().into_bytes(), 32).unwrap();
        SentenceEncoder::new(tokenizer, CountingEmbedder::default()).with_batch_size(batch_size)
    }

    #[test]
    fn test_embed_texts_batches_in_order() {
        let encoder = encoder(2);
        let texts: Vec<String> = ["karma", "karma dharma", "krishna arjuna yoga", "moksha"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let embeddings = encoder.embed_texts(&texts).unwrap();

        assert_eq!(embeddings.len(), 4);
        // CountingEmbedder encodes the token count in the first component
        let lengths: Vec<f32> = embeddings.iter().map(|e| e[0]).collect();
        assert_eq!(lengths, vec![1.0, 2.0, 3.0, 1.0]);
        assert_eq!(encoder.embedder().batch_sizes(), vec![2, 2]);
    }

    #[test]
    fn test_embed_text_single() {
        let encoder = encoder(8);
        let embedding = encoder.embed_text("dharma yoga").unwrap();
        assert_eq!(embedding.len(), encoder.embedding_dim());
        assert_eq!(embedding[0], 2.0);
    }

    #[test]
    fn test_batch_size_minimum_is_one() {
        assert_eq!(encoder(0).batch_size(), 1);
    }

    #[test]
    fn test_tokenization_error_propagates() {
        let encoder = encoder(4);
        let result = encoder.embed_texts(&["karma".to_string(), String::new()]);
        assert!(matches!(result, Err(EmbeddingError::TokenizationFailed(_))));
    }
}
