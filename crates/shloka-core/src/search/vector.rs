// Exact (flat) cosine-similarity index

use super::types::validate_dimension;
use crate::error::SearchError;
use std::cmp::Ordering;
use tracing::instrument;

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero magnitude. Extra components of the
/// longer vector are ignored; callers validate dimensions first.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Indices of the `k` highest scores, best first.
///
/// Ties keep corpus order (lower index first). NaN scores sort last.
/// If `k` exceeds the number of scores every index is returned.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    let key = |i: usize| {
        let s = scores[i];
        if s.is_nan() {
            f32::NEG_INFINITY
        } else {
            s
        }
    };
    // Stable sort keeps lower indices ahead on equal scores
    indices.sort_by(|&a, &b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    indices.truncate(k);
    indices
}

/// Flat vector index scoring every stored vector against a query.
///
/// The corpus is small and fixed, so exhaustive scoring is exact and cheap.
/// Vector magnitudes are computed once at insertion.
pub struct VectorIndex {
    vectors: Vec<Vec<f32>>,
    magnitudes: Vec<f32>,
    dimension: usize,
}

impl VectorIndex {
    /// Create an empty index for vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: Vec::new(),
            magnitudes: Vec::new(),
            dimension,
        }
    }

    /// Append a vector. Its position is the next corpus index.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DimensionMismatch` if the vector length differs
    /// from the index dimension.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<(), SearchError> {
        validate_dimension(self.dimension, vector.len())?;
        self.magnitudes.push(magnitude(&vector));
        self.vectors.push(vector);
        Ok(())
    }

    /// Cosine similarity of `query` against every stored vector, in
    /// insertion order.
    #[instrument(skip_all, fields(index_size = self.vectors.len()))]
    pub fn scores(&self, query: &[f32]) -> Result<Vec<f32>, SearchError> {
        validate_dimension(self.dimension, query.len())?;
        let query_magnitude = magnitude(query);

        Ok(self
            .vectors
            .iter()
            .zip(self.magnitudes.iter())
            .map(|(v, &mag)| {
                if mag == 0.0 || query_magnitude == 0.0 {
                    return 0.0;
                }
                let dot: f32 = v.iter().zip(query.iter()).map(|(&x, &y)| x * y).sum();
                dot / (mag * query_magnitude)
            })
            .collect())
    }

    /// Top `k` (index, similarity) pairs for `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>, SearchError> {
        let scores = self.scores(query)?;
        Ok(top_k_indices(&scores, k)
            .into_iter()
            .map(|i| (i, scores[i]))
            .collect())
    }

    /// Stored vector at `index`.
    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
