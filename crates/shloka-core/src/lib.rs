//! # Shloka Core
//!
//! Semantic search over a fixed corpus of verses.
//!
//! A JSON corpus is loaded, every verse is embedded once with a multilingual
//! sentence-embedding model, and each query is ranked against all verses by
//! cosine similarity. Results can be rendered in English or Kannada and
//! spoken through a speech synthesis client.
//!
//! ## Modules
//!
//! - [`corpus`] - Corpus loading and verse normalisation
//! - [`embedding`] - Tokenizer and BERT sentence encoder (Candle)
//! - [`search`] - Cosine-similarity retrieval engine
//! - [`i18n`] - Bilingual interface text
//! - [`speech`] - Text-to-speech client and audio embedding
//! - [`config`] - Production configuration constants
//! - [`error`] - Error types

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod i18n;
pub mod search;
pub mod speech;

#[cfg(test)]
pub(crate) mod test_utils;
