//! Embedding model abstractions and implementations.
//!
//! ## Core Traits
//!
//! - [`AssetLoader`] - Platform-agnostic model/tokenizer loading
//! - [`Embedder`] - Token-level model inference interface
//! - [`TextEmbedder`] - Text-level interface the search engine depends on
//! - [`ModelConfig`] - Model configuration parameters
//!
//! ## Implementations
//!
//! - [`BertConfig`] - Configuration read from a model's `config.json`
//! - [`BertEmbedder`] - BERT encoder with masked mean pooling, using Candle
//! - [`TokenizerHandle`] - Wrapper for HuggingFace tokenizers
//! - [`SentenceEncoder`] - Tokenizer + model, batched
//!
//! ## Example
//!
//! ```ignore
//! use shloka_core::embedding::{BertConfig, SentenceEncoder, TextEmbedder};
//!
//! let encoder = SentenceEncoder::load(&loader, BertConfig::default()).await?;
//! let vectors = encoder.embed_texts(&corpus.texts())?;
//! ```

mod traits;

pub mod config;
pub mod encoder;
pub mod model;
pub mod tokenizer;

pub use traits::{AssetLoader, Embedder, ModelConfig, TextEmbedder};

pub use config::BertConfig;
pub use encoder::SentenceEncoder;
pub use model::BertEmbedder;
pub use tokenizer::TokenizerHandle;
