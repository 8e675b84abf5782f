//! Configuration for BERT-family sentence-embedding models.
//!
//! The architecture fields are read from the model's `config.json`; the
//! remaining fields describe how the sentence-transformers pipeline uses
//! the encoder (sequence cap, normalisation).

use super::traits::ModelConfig;
use crate::config::{DEFAULT_MODEL_ID, EMBEDDING_DIM, MAX_SEQUENCE_TOKENS};
use crate::error::EmbeddingError;
use serde::{Deserialize, Serialize};

/// Configuration for BERT sentence-embedding models.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BertConfig {
    /// Model identifier (not part of `config.json`)
    #[serde(default = "default_model_id", skip_serializing)]
    pub model_id: String,

    /// Whether to apply L2 normalization to embeddings
    #[serde(default)]
    pub normalize_embeddings: bool,

    /// Tokenizer vocabulary size
    pub vocab_size: usize,

    /// Hidden dimension size (embedding output dimension)
    pub hidden_size: usize,

    /// Number of transformer layers
    pub num_hidden_layers: usize,

    /// Number of attention heads per layer
    pub num_attention_heads: usize,

    /// Intermediate (FFN) dimension size
    pub intermediate_size: usize,

    /// Maximum position embeddings the weights were trained with
    pub max_position_embeddings: usize,

    /// Token used to right-pad batched sequences
    #[serde(default)]
    pub pad_token_id: u32,

    /// Tokens kept per input before truncation
    #[serde(default = "default_max_seq_length")]
    pub max_seq_length: usize,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_max_seq_length() -> usize {
    MAX_SEQUENCE_TOKENS
}

impl Default for BertConfig {
    fn default() -> Self {
        // sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2
        Self {
            model_id: default_model_id(),
            normalize_embeddings: false,
            vocab_size: 250_037,
            hidden_size: EMBEDDING_DIM,
            num_hidden_layers: 12,
            num_attention_heads: 12,
            intermediate_size: 1536,
            max_position_embeddings: 512,
            pad_token_id: 0,
            max_seq_length: MAX_SEQUENCE_TOKENS,
        }
    }
}

impl ModelConfig for BertConfig {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn embedding_dim(&self) -> usize {
        self.hidden_size
    }

    fn max_sequence_length(&self) -> usize {
        self.max_seq_length.min(self.max_position_embeddings)
    }

    fn normalize_embeddings(&self) -> bool {
        self.normalize_embeddings
    }
}

impl BertConfig {
    /// Parses a HuggingFace `config.json`.
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingError::InvalidConfig` if the JSON is malformed or
    /// missing an architecture field.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, EmbeddingError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|e| {
            EmbeddingError::InvalidConfig(format!("Failed to parse config.json: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the model identifier.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Checks that the attention heads evenly divide the hidden size.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.num_attention_heads == 0 || self.hidden_size % self.num_attention_heads != 0 {
            return Err(EmbeddingError::InvalidConfig(format!(
                "hidden_size {} is not divisible by num_attention_heads {}",
                self.hidden_size, self.num_attention_heads
            )));
        }
        if self.max_sequence_length() == 0 {
            return Err(EmbeddingError::InvalidConfig(
                "max sequence length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINILM_CONFIG: &str = r#"{
        "architectures": ["BertModel"],
        "attention_probs_dropout_prob": 0.1,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "hidden_size": 384,
        "initializer_range": 0.02,
        "intermediate_size": 1536,
        "layer_norm_eps": 1e-12,
        "max_position_embeddings": 512,
        "model_type": "bert",
        "num_attention_heads": 12,
        "num_hidden_layers": 12,
        "pad_token_id": 0,
        "type_vocab_size": 2,
        "vocab_size": 250037
    }"#;

    #[test]
    fn test_default_config() {
        let config = BertConfig::default();
        assert_eq!(config.embedding_dim(), 384);
        assert_eq!(config.max_sequence_length(), 128);
        assert!(!config.normalize_embeddings());
        assert_eq!(config.model_id(), DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_parse_config_json() {
        let config = BertConfig::from_json_bytes(MINILM_CONFIG.as_bytes()).unwrap();
        assert_eq!(config.hidden_size, 384);
        assert_eq!(config.num_hidden_layers, 12);
        assert_eq!(config.vocab_size, 250037);
        assert_eq!(config.max_seq_length, MAX_SEQUENCE_TOKENS);
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = BertConfig::from_json_bytes(br#"{"hidden_size": 384}"#);
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_uneven_heads() {
        let config = BertConfig {
            num_attention_heads: 5,
            ..BertConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sequence_length_capped_by_positions() {
        let config = BertConfig {
            max_seq_length: 1024,
            ..BertConfig::default()
        };
        assert_eq!(config.max_sequence_length(), 512);
    }
}
