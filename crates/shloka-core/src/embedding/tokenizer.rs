//! Tokenization utilities for text processing.
//!
//! This module provides the `TokenizerHandle` type for managing HuggingFace
//! tokenizers with proper truncation configuration.

use crate::error::EmbeddingError;
use tokenizers::tokenizer::{Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy};

/// Handle for a configured tokenizer.
///
/// Wraps a HuggingFace tokenizer with truncation settings.
///
/// # Examples
///
/// ```ignore
/// let tokenizer_bytes = std::fs::read("tokenizer.json")?;
/// let handle = TokenizerHandle::from_bytes(tokenizer_bytes, 128)?;
///
/// let tokens = handle.tokenize("ಕರ್ಮದ ಬಗ್ಗೆ ಕೃಷ್ಣನು ಏನು ಹೇಳಿದನು?")?;
/// ```
#[derive(Clone)]
pub struct TokenizerHandle {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TokenizerHandle {
    /// Creates a tokenizer from JSON bytes with truncation configured.
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingError::TokenizerUnavailable` if the bytes are not a
    /// valid tokenizer and `EmbeddingError::InvalidConfig` if truncation
    /// cannot be applied.
    pub fn from_bytes(tokenizer_bytes: Vec<u8>, max_length: usize) -> Result<Self, EmbeddingError> {
        let mut tokenizer = Tokenizer::from_bytes(tokenizer_bytes).map_err(|e| {
            EmbeddingError::TokenizerUnavailable(format!("Failed to deserialize tokenizer: {}", e))
        })?;

        configure_truncation(&mut tokenizer, max_length)?;

        Ok(Self {
            tokenizer,
            max_length,
        })
    }

    /// Returns the configured maximum length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Tokenizes text into token IDs, including special tokens.
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingError::TokenizationFailed` if encoding fails or
    /// produces no tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<u32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::TokenizationFailed(format!("Encoding failed: {}", e)))?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Err(EmbeddingError::TokenizationFailed(
                "Tokenizer returned no tokens".to_string(),
            ));
        }

        Ok(ids.to_vec())
    }

    /// Returns the vocabulary size, including added tokens.
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

/// Configures tokenizer with truncation settings.
fn configure_truncation(
    tokenizer: &mut Tokenizer,
    max_length: usize,
) -> Result<(), EmbeddingError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            stride: 0,
            strategy: TruncationStrategy::OnlyFirst,
            direction: TruncationDirection::Right,
        }))
        .map_err(|e| {
            EmbeddingError::InvalidConfig(format!(
                "Failed to configure tokenizer truncation: {}",
                e
            ))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::word_level_tokenizer_json;

    fn handle(max_length: usize) -> TokenizerHandle {
        TokenizerHandle::from_bytes(word_level_tokenizer_json().into_bytes(), max_length)
            .expect("Failed to create TokenizerHandle")
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = handle(16).tokenize("krishna karma arjuna").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_ne!(tokens[0], tokens[1]);
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let tokens = handle(16).tokenize("zzz").unwrap();
        assert_eq!(tokens, vec![0]);
    }

    #[test]
    fn test_tokenize_empty_string() {
        let result = handle(16).tokenize("");
        assert!(matches!(result, Err(EmbeddingError::TokenizationFailed(_))));
    }

    #[test]
    fn test_truncation() {
        let long_text = "karma ".repeat(100);
        let tokens = handle(10).tokenize(&long_text).unwrap();
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_invalid_bytes() {
        let result = TokenizerHandle::from_bytes(b"{}".to_vec(), 16);
        assert!(matches!(
            result,
            Err(EmbeddingError::TokenizerUnavailable(_))
        ));
    }

    #[test]
    fn test_clone() {
        let handle = handle(16);
        let cloned = handle.clone();
        assert_eq!(handle.max_length(), cloned.max_length());
        assert_eq!(handle.vocab_size(), cloned.vocab_size());
        assert_eq!(
            handle.tokenize("dharma").unwrap(),
            cloned.tokenize("dharma").unwrap()
        );
    }
}
