//! Error types for shloka-core.
//!
//! This module defines the error types used across the core library for
//! corpus loading, embedding, retrieval and speech synthesis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the verse corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus file does not exist
    #[error("JSON file not found at {}", .0.display())]
    NotFound(PathBuf),
    /// Corpus file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Corpus file is not valid JSON
    #[error("Invalid JSON file at {}: {}", .0.display(), .1)]
    InvalidJson(PathBuf, String),
}

/// Errors that can occur during embedding operations.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Failed to load model from bytes
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    /// Failed to create tensor during inference
    #[error("Failed to create tensor: {0}")]
    TensorCreation(String),
    /// Forward pass through the model failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    /// Failed to tokenize text
    #[error("Tokenization failed: {0}")]
    TokenizationFailed(String),
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Tokenizer not available or initialization failed
    #[error("Tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),
}

/// Errors that can occur while building the index or answering a query.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// No verses were loaded, so there is nothing to rank
    #[error("No verses or embeddings available")]
    EmptyIndex,
    /// Embedding generation error
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    /// Vector dimension mismatch (expected vs actual)
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected embedding dimension
        expected: usize,
        /// Actual embedding dimension received
        actual: usize,
    },
    /// Invalid search query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Nothing left to speak after trimming
    #[error("No text to speak")]
    EmptyText,
    /// Request could not be sent or the body could not be read
    #[error("Speech request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Endpoint answered with a non-success status
    #[error("Speech endpoint returned HTTP {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },
    /// Response contained no audio payload
    #[error("Speech endpoint returned no audio")]
    NoAudio,
    /// Audio payload was not valid base64
    #[error("Invalid audio payload: {0}")]
    InvalidPayload(String),
}
