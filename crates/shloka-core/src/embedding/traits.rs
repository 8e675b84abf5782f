//! Traits for embedding operations.
//!
//! This module defines the core abstractions for embedding models, asset
//! loading and model configuration. These traits allow different
//! implementations to be swapped without changing dependent code.

use crate::error::EmbeddingError;
use async_trait::async_trait;
use std::io;

/// Trait for loading model assets (weights, tokenizer, architecture).
///
/// The CLI reads from a model directory on disk; tests can serve bytes from
/// memory.
///
/// # Examples
///
/// ```ignore
/// struct FileAssetLoader { dir: PathBuf }
///
/// #[async_trait]
/// impl AssetLoader for FileAssetLoader {
///     async fn load_model_bytes(&self) -> io::Result<Vec<u8>> {
///         tokio::fs::read(self.dir.join("model.safetensors")).await
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Load model weights as raw bytes (safetensors format).
    async fn load_model_bytes(&self) -> io::Result<Vec<u8>>;

    /// Load tokenizer configuration as raw bytes (JSON format).
    async fn load_tokenizer_bytes(&self) -> io::Result<Vec<u8>>;

    /// Load model architecture (`config.json`) as raw bytes.
    async fn load_config_bytes(&self) -> io::Result<Vec<u8>>;
}

/// Trait for token-level embedding model operations.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across threads.
pub trait Embedder: Send + Sync {
    /// Returns the maximum number of position embeddings (sequence length).
    fn max_position_embeddings(&self) -> usize;

    /// Returns the embedding dimension (vector size).
    ///
    /// All embeddings from this model will have this length.
    fn embedding_dim(&self) -> usize;

    /// Generates an embedding from token IDs.
    fn embed_tokens(&self, token_ids: Vec<u32>) -> Result<Vec<f32>, EmbeddingError>;

    /// Generates embeddings for a batch of token sequences.
    ///
    /// Sequences may have different lengths; implementations pad and mask
    /// as needed so the result for a sequence does not depend on its
    /// batch neighbours.
    fn embed_batch_tokens(
        &self,
        batch_token_ids: Vec<Vec<u32>>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Trait for text-level embedding.
///
/// This is the seam the search engine depends on: anything that can turn
/// strings into fixed-size vectors can back a [`VerseSearchEngine`].
///
/// [`VerseSearchEngine`]: crate::search::VerseSearchEngine
pub trait TextEmbedder: Send + Sync {
    /// Dimension of every vector this embedder returns.
    fn embedding_dim(&self) -> usize;

    /// Embeds a single text.
    fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds many texts, returning one vector per input in input order.
    fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed_text(text)).collect()
    }
}

/// Trait for embedding model configurations.
pub trait ModelConfig: Clone + Send + Sync {
    /// Returns the model identifier.
    fn model_id(&self) -> &str;

    /// Returns the output embedding dimension.
    fn embedding_dim(&self) -> usize;

    /// Returns the maximum sequence length the model can handle.
    fn max_sequence_length(&self) -> usize;

    /// Whether embeddings should be L2 normalized (unit vectors).
    fn normalize_embeddings(&self) -> bool;
}
