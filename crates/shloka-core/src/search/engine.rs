use super::types::VerseMatch;
use super::vector::VectorIndex;
use crate::corpus::Corpus;
use crate::embedding::TextEmbedder;
use crate::error::{EmbeddingError, SearchError};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Semantic search over a fixed verse corpus.
///
/// Every verse is embedded once in [`build`](Self::build); each query is
/// embedded on [`retrieve`](Self::retrieve) and ranked against all verses by
/// cosine similarity.
pub struct VerseSearchEngine<E: TextEmbedder> {
    corpus: Corpus,
    index: VectorIndex,
    embedder: E,
}

impl<E: TextEmbedder> VerseSearchEngine<E> {
    /// Embeds every verse of `corpus` with `embedder`.
    ///
    /// An empty corpus yields an empty engine; queries against it fail with
    /// `SearchError::EmptyIndex`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Embedding` if the embedder fails, or
    /// `SearchError::DimensionMismatch` if it returns vectors of the wrong size.
    #[instrument(skip_all, fields(verses = corpus.len()))]
    pub fn build(corpus: Corpus, embedder: E) -> Result<Self, SearchError> {
        let mut index = VectorIndex::new(embedder.embedding_dim());

        if corpus.is_empty() {
            warn!("No verses to embed");
            return Ok(Self {
                corpus,
                index,
                embedder,
            });
        }

        let start = Instant::now();
        let embeddings = embedder.embed_texts(&corpus.texts())?;
        if embeddings.len() != corpus.len() {
            return Err(EmbeddingError::InferenceFailed(format!(
                "Expected {} embeddings, got {}",
                corpus.len(),
                embeddings.len()
            ))
            .into());
        }

        for embedding in embeddings {
            index.add(embedding)?;
        }

        info!(
            "Created embeddings for {} verses in {:.2?}",
            index.len(),
            start.elapsed()
        );

        Ok(Self {
            corpus,
            index,
            embedder,
        })
    }

    /// Returns the `top_k` verses most similar to `query`, best first.
    ///
    /// If `top_k` exceeds the corpus size every verse is returned.
    ///
    /// # Errors
    ///
    /// - `SearchError::EmptyIndex` if no verses were indexed
    /// - `SearchError::InvalidQuery` if `top_k` is 0
    /// - `SearchError::Embedding` if the query cannot be embedded
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<VerseMatch>, SearchError> {
        self.check_ready(top_k)?;

        let start = Instant::now();
        let query_embedding = self.embedder.embed_text(query)?;
        debug!("Embedded query in {:.2?}", start.elapsed());

        self.retrieve_by_embedding(&query_embedding, top_k)
    }

    /// Ranks verses against an already-computed query embedding.
    pub fn retrieve_by_embedding(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VerseMatch>, SearchError> {
        self.check_ready(top_k)?;

        let matches = self
            .index
            .search(query_embedding, top_k)?
            .into_iter()
            .enumerate()
            .filter_map(|(position, (index, similarity))| {
                self.corpus.get(index).map(|verse| VerseMatch {
                    rank: position + 1,
                    index,
                    verse: verse.clone(),
                    similarity,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            "Returning {} matches (best similarity {:?})",
            matches.len(),
            matches.first().map(|m| m.similarity)
        );
        Ok(matches)
    }

    fn check_ready(&self, top_k: usize) -> Result<(), SearchError> {
        if self.index.is_empty() {
            return Err(SearchError::EmptyIndex);
        }
        if top_k == 0 {
            return Err(SearchError::InvalidQuery(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The indexed corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The embedder used for verses and queries.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn embedding_dim(&self) -> usize {
        self.index.dimension()
    }

    /// Number of indexed verses.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
