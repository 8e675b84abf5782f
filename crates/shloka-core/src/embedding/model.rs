//! Embedding model implementations and inference.
//!
//! This module provides a BERT sentence-embedding model using the Candle ML
//! framework. Token embeddings from the encoder are mean-pooled under the
//! attention mask, the way sentence-transformers pools them.

use super::config::BertConfig;
use super::traits::Embedder;
use crate::error::EmbeddingError;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tracing::{debug, info};

/// BERT sentence-embedding model.
///
/// # Examples
///
/// ```ignore
/// let config_bytes = std::fs::read("config.json")?;
/// let model_bytes = std::fs::read("model.safetensors")?;
/// let model = BertEmbedder::from_bytes(model_bytes, &config_bytes, BertConfig::default())?;
///
/// let embedding = model.embed_tokens(vec![0, 35378, 8999, 2])?;
/// assert_eq!(embedding.len(), 384);
/// ```
pub struct BertEmbedder {
    model: BertModel,
    config: BertConfig,
    device: Device,
}

impl BertEmbedder {
    /// Creates a new model from safetensors bytes and the model's `config.json`.
    ///
    /// `config_bytes` supplies the architecture; `model_id`, normalisation and
    /// the sequence cap are taken from `overrides`.
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingError::InvalidConfig` for a malformed `config.json`
    /// and `EmbeddingError::ModelLoad` if the weights cannot be loaded.
    pub fn from_bytes(
        model_bytes: Vec<u8>,
        config_bytes: &[u8],
        overrides: BertConfig,
    ) -> Result<Self, EmbeddingError> {
        let parsed = BertConfig::from_json_bytes(config_bytes)?;
        let config = BertConfig {
            model_id: overrides.model_id,
            normalize_embeddings: overrides.normalize_embeddings,
            max_seq_length: overrides.max_seq_length,
            ..parsed
        };

        info!("Loading embedding model '{}'", config.model_id);
        info!(
            "Model bytes length: {} bytes ({:.2}MB)",
            model_bytes.len(),
            model_bytes.len() as f64 / 1_000_000.0
        );

        let candle_config: Config = serde_json::from_slice(config_bytes).map_err(|e| {
            EmbeddingError::InvalidConfig(format!("Unsupported model config: {}", e))
        })?;

        let device = Self::select_device();
        let model = Self::create_model(model_bytes, &candle_config, &config, &device)?;

        Ok(Self {
            model,
            config,
            device,
        })
    }

    /// Returns a reference to the config.
    pub fn config(&self) -> &BertConfig {
        &self.config
    }

    /// Returns a reference to the device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Selects the best available compute device.
    ///
    /// Tries CUDA, then Metal, then falls back to CPU. The GPU constructors
    /// return an error when candle was built without the matching feature.
    pub fn select_device() -> Device {
        if let Ok(cuda_device) = Device::new_cuda(0) {
            info!("Using CUDA GPU");
            return cuda_device;
        }

        if let Ok(metal_device) = Device::new_metal(0) {
            info!("Using Metal GPU");
            return metal_device;
        }

        info!("Using CPU");
        Device::Cpu
    }

    fn create_model(
        model_bytes: Vec<u8>,
        candle_config: &Config,
        config: &BertConfig,
        device: &Device,
    ) -> Result<BertModel, EmbeddingError> {
        info!(
            "Config: {}d hidden, {} layers, {} heads",
            config.hidden_size, config.num_hidden_layers, config.num_attention_heads
        );

        // Validate safetensors header
        if model_bytes.len() < 8 {
            return Err(EmbeddingError::ModelLoad(
                "Model file too small".to_string(),
            ));
        }

        let vb = VarBuilder::from_buffered_safetensors(model_bytes, DType::F32, device)
            .map_err(|e| {
                EmbeddingError::ModelLoad(format!("Failed to create VarBuilder: {}", e))
            })?;

        let model = BertModel::load(vb, candle_config)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to create BertModel: {}", e)))?;
        info!("BertModel created successfully");

        Ok(model)
    }

    /// Mean of token embeddings, ignoring padded positions.
    ///
    /// `hidden`: `[batch, seq, hidden]`, `mask`: `[batch, seq]` of 0/1.
    fn masked_mean_pool(hidden: &Tensor, mask: &Tensor) -> Result<Tensor, EmbeddingError> {
        let mask = mask
            .to_dtype(DType::F32)
            .and_then(|m| m.unsqueeze(2))
            .map_err(inference("Failed to prepare mask"))?;
        let summed = hidden
            .broadcast_mul(&mask)
            .and_then(|t| t.sum(1))
            .map_err(inference("Failed to sum"))?;
        let counts = mask.sum(1).map_err(inference("Failed to count tokens"))?;
        summed
            .broadcast_div(&counts)
            .map_err(inference("Failed to average"))
    }

    /// Applies L2 normalization to create unit vectors.
    fn normalize_l2(v: &Tensor) -> Result<Tensor, EmbeddingError> {
        let norms = v
            .sqr()
            .and_then(|t| t.sum_keepdim(1))
            .and_then(|t| t.sqrt())
            .map_err(inference("Failed to compute norms"))?;
        v.broadcast_div(&norms)
            .map_err(inference("Failed to normalize"))
    }

    /// Pads `batch` to its longest sequence and builds the matching mask.
    fn pad_batch(&self, batch: &[Vec<u32>]) -> (Vec<u32>, Vec<u32>, usize) {
        let max_len = batch.iter().map(Vec::len).max().unwrap_or(0);
        let mut ids = Vec::with_capacity(batch.len() * max_len);
        let mut mask = Vec::with_capacity(batch.len() * max_len);

        for seq in batch {
            let padding = max_len - seq.len();
            ids.extend_from_slice(seq);
            ids.extend(std::iter::repeat(self.config.pad_token_id).take(padding));
            mask.extend(std::iter::repeat(1u32).take(seq.len()));
            mask.extend(std::iter::repeat(0u32).take(padding));
        }

        (ids, mask, max_len)
    }
}

/// Wraps a candle error as an inference failure with context.
fn inference(context: &'static str) -> impl Fn(candle_core::Error) -> EmbeddingError {
    move |e| EmbeddingError::InferenceFailed(format!("{}: {}", context, e))
}

impl Embedder for BertEmbedder {
    fn max_position_embeddings(&self) -> usize {
        self.config.max_position_embeddings
    }

    fn embedding_dim(&self) -> usize {
        self.config.hidden_size
    }

    fn embed_tokens(&self, token_ids: Vec<u32>) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_batch_tokens(vec![token_ids])?
            .pop()
            .ok_or_else(|| EmbeddingError::InferenceFailed("Model returned no embedding".into()))
    }

    fn embed_batch_tokens(
        &self,
        batch_token_ids: Vec<Vec<u32>>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if batch_token_ids.is_empty() {
            return Ok(vec![]);
        }
        if batch_token_ids.iter().any(Vec::is_empty) {
            return Err(EmbeddingError::TensorCreation(
                "Cannot embed an empty token sequence".to_string(),
            ));
        }

        let batch_size = batch_token_ids.len();
        let (ids, mask, max_len) = self.pad_batch(&batch_token_ids);
        debug!("Embedding batch of {} (padded to {} tokens)", batch_size, max_len);

        let input_ids = Tensor::from_vec(ids, (batch_size, max_len), &self.device).map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create batch tensor: {}", e))
        })?;
        let attention_mask =
            Tensor::from_vec(mask, (batch_size, max_len), &self.device).map_err(|e| {
                EmbeddingError::TensorCreation(format!("Failed to create mask tensor: {}", e))
            })?;
        let token_type_ids = input_ids.zeros_like().map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create token types: {}", e))
        })?;

        // Forward pass: [batch_size, seq_len] -> [batch_size, seq_len, hidden_size]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(inference("Forward pass failed"))?;

        // Mean pooling: [batch_size, seq_len, hidden_size] -> [batch_size, hidden_size]
        let pooled = Self::masked_mean_pool(&hidden, &attention_mask)?;

        let pooled = if self.config.normalize_embeddings {
            Self::normalize_l2(&pooled)?
        } else {
            pooled
        };

        pooled
            .to_vec2::<f32>()
            .map_err(inference("Failed to convert embeddings to vec"))
    }
}
