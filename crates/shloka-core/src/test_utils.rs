//! Test utilities for shloka-core.
//!
//! Deterministic stand-ins for the tokenizer and embedding model, so unit
//! tests run without downloading model files. Only compiled when running
//! tests.

use crate::embedding::{Embedder, TextEmbedder};
use crate::error::EmbeddingError;
use std::sync::Mutex;

/// Words known to the test tokenizer and the keyword embedder.
pub const TEST_VOCAB: [&str; 12] = [
    "karma", "dharma", "krishna", "arjuna", "yoga", "moksha", "tyaga", "sannyasa", "gunas",
    "duty", "knowledge", "devotion",
];

/// Builds a whitespace + word-level tokenizer over [`TEST_VOCAB`].
///
/// `[UNK]` is id 0; vocabulary words follow in order.
pub fn word_level_tokenizer_json() -> String {
    let mut vocab = serde_json::Map::new();
    vocab.insert("[UNK]".to_string(), 0.into());
    for (i, word) in TEST_VOCAB.iter().enumerate() {
        vocab.insert(word.to_string(), (i + 1).into());
    }

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    })
    .to_string()
}

/// Token-level embedder that records the batch sizes it was called with.
///
/// Component 0 of each embedding is the token count, component 1 the sum of
/// token ids.
#[derive(Default)]
pub struct CountingEmbedder {
    batches: Mutex<Vec<usize>>,
}

impl CountingEmbedder {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

impl Embedder for CountingEmbedder {
    fn max_position_embeddings(&self) -> usize {
        512
    }

    fn embedding_dim(&self) -> usize {
        4
    }

    fn embed_tokens(&self, token_ids: Vec<u32>) -> Result<Vec<f32>, EmbeddingError> {
        let sum: u32 = token_ids.iter().sum();
        Ok(vec![token_ids.len() as f32, sum as f32, 0.0, 1.0])
    }

    fn embed_batch_tokens(
        &self,
        batch_token_ids: Vec<Vec<u32>>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batches.lock().unwrap().push(batch_token_ids.len());
        batch_token_ids
            .into_iter()
            .map(|ids| self.embed_tokens(ids))
            .collect()
    }
}

/// Text embedder producing bag-of-words counts over [`TEST_VOCAB`].
///
/// Texts sharing vocabulary words get positive cosine similarity; texts
/// with no vocabulary words embed to the zero vector.
#[derive(Default)]
pub struct KeywordEmbedder;

impl TextEmbedder for KeywordEmbedder {
    fn embedding_dim(&self) -> usize {
        TEST_VOCAB.len()
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut v = vec![0.0; TEST_VOCAB.len()];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
        {
            if let Some(i) = TEST_VOCAB.iter().position(|w| *w == word) {
                v[i] += 1.0;
            }
        }
        Ok(v)
    }
}
