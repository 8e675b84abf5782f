use crate::corpus::Verse;
use crate::error::SearchError;
use serde::Serialize;

/// A verse returned for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseMatch {
    /// 1-based position in the result list
    pub rank: usize,
    /// Position of the verse in the corpus
    pub index: usize,
    /// The matched verse
    pub verse: Verse,
    /// Cosine similarity between query and verse embeddings, in [-1, 1]
    pub similarity: f32,
}

impl VerseMatch {
    /// Similarity as a percentage, clamped to [0, 100].
    pub fn similarity_percent(&self) -> f32 {
        (self.similarity * 100.0).clamp(0.0, 100.0)
    }
}

/// Validates that an embedding has the expected dimension.
///
/// Returns `Ok(())` if dimensions match, or `Err(SearchError::DimensionMismatch)` otherwise.
///
/// # Examples
///
/// ```
/// use shloka_core::search::validate_dimension;
///
/// assert!(validate_dimension(3, 3).is_ok());
/// assert!(validate_dimension(5, 3).is_err());
/// ```
pub fn validate_dimension(expected: usize, actual: usize) -> Result<(), SearchError> {
    if actual == expected {
        Ok(())
    } else {
        Err(SearchError::DimensionMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse_match(similarity: f32) -> VerseMatch {
        VerseMatch {
            rank: 1,
            index: 0,
            verse: Verse::from_text("text"),
            similarity,
        }
    }

    #[test]
    fn test_similarity_percent() {
        assert!((verse_match(0.4567).similarity_percent() - 45.67).abs() < 1e-3);
        assert_eq!(verse_match(-0.2).similarity_percent(), 0.0);
        assert_eq!(verse_match(1.0000001).similarity_percent(), 100.0);
    }
}
