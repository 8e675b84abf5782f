//! Semantic verse retrieval.
//!
//! The corpus is embedded once; each query is embedded and compared against
//! every verse by cosine similarity. The top-K verses are returned best
//! first.
//!
//! # Architecture
//!
//! - `types`: Result type ([`VerseMatch`]) and dimension validation
//! - `vector`: Flat cosine-similarity index and top-K selection
//! - `engine`: [`VerseSearchEngine`] tying corpus, embedder and index together
//!
//! # Usage
//!
//! ```ignore
//! use shloka_core::corpus::Corpus;
//! use shloka_core::search::VerseSearchEngine;
//!
//! let corpus = Corpus::load("bhagavadgita_Chapter_18.json")?;
//! let engine = VerseSearchEngine::build(corpus, encoder)?;
//!
//! for m in engine.retrieve("What did Krishna say about karma?", 3)? {
//!     println!("{}.{} ({:.4})", m.verse.chapter_label(), m.verse.verse_label(), m.similarity);
//! }
//! ```
//!
//! # Algorithm Details
//!
//! Scoring is exhaustive: `similarity = (q · v) / (|q| |v|)` for every verse
//! vector `v`. Zero-magnitude vectors score 0. Ties keep corpus order.

mod engine;
pub mod types;
pub mod vector;

pub use engine::VerseSearchEngine;
pub use types::{validate_dimension, VerseMatch};
pub use vector::{cosine_similarity, top_k_indices, VectorIndex};
