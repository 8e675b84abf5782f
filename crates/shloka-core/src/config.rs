//! Production configuration constants.
//!
//! These values define the default model, batching and result-count
//! bounds used by the library and the CLI.
//!
//! # Usage
//!
//! ```
//! use shloka_core::config::{DEFAULT_TOP_K, EMBEDDING_DIM, MAX_TOP_K};
//!
//! let embedding = vec![0.0f32; EMBEDDING_DIM];
//! assert!(DEFAULT_TOP_K <= MAX_TOP_K);
//! ```

// =============================================================================
// Embedding Model Configuration
// =============================================================================

/// Default sentence-embedding model.
///
/// Multilingual MiniLM handles Kannada queries and verses as well as
/// English ones.
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Embedding vector dimension of the default model (`hidden_size`).
pub const EMBEDDING_DIM: usize = 384;

/// Maximum tokens per input used by the sentence-transformers pipeline
/// for the default model. Longer verses are truncated.
pub const MAX_SEQUENCE_TOKENS: usize = 128;

/// Number of texts embedded per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 32;

// =============================================================================
// Retrieval Configuration
// =============================================================================

/// Smallest number of results a caller may request.
pub const MIN_TOP_K: usize = 1;

/// Largest number of results the interface offers.
pub const MAX_TOP_K: usize = 10;

/// Number of results shown when the caller does not choose.
pub const DEFAULT_TOP_K: usize = 3;

// =============================================================================
// Asset File Names
// =============================================================================

/// Default corpus file name.
pub const CORPUS_FILENAME: &str = "bhagavadgita_Chapter_18.json";

/// Model weights file name (safetensors).
pub const MODEL_FILENAME: &str = "model.safetensors";

/// Tokenizer file name (HuggingFace JSON).
pub const TOKENIZER_FILENAME: &str = "tokenizer.json";

/// Model architecture file name.
pub const MODEL_CONFIG_FILENAME: &str = "config.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_bounds_are_ordered() {
        let (min, default, max) = (MIN_TOP_K, DEFAULT_TOP_K, MAX_TOP_K);
        assert!(min <= default && default <= max);
    }

    #[test]
    fn test_embedding_dim_matches_minilm() {
        assert_eq!(EMBEDDING_DIM, 384);
    }
}
