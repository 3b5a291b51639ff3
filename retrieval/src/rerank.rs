//! Reranking: re-score a candidate pool by embedding cosine similarity.

use std::sync::Arc;

use tracing::info;
use vector_store::{EmbeddingsProvider, SearchResult};

use crate::error::RetrievalError;
use crate::query::Query;

/// Re-scores candidates against the original query with the same embedding
/// model used for indexing.
pub struct Reranker {
    embedder: Arc<dyn EmbeddingsProvider>,
    mock: bool,
}

impl Reranker {
    /// Creates a reranker; `mock` passes the first `k` candidates through.
    pub fn new(embedder: Arc<dyn EmbeddingsProvider>, mock: bool) -> Self {
        Self { embedder, mock }
    }

    /// Returns at most `keep_top_k` candidates ordered by descending cosine
    /// similarity to the query.
    ///
    /// The sort is stable, so with `keep_top_k >= candidates.len()` the
    /// output is a permutation of the input. Empty candidates and mock mode
    /// skip the embedding model entirely.
    ///
    /// # Errors
    /// Embedding failures surface to the caller, which falls back to the
    /// first `keep_top_k` inputs in original order.
    pub async fn rerank(
        &self,
        query: &Query,
        candidates: Vec<SearchResult>,
        keep_top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        if self.mock || candidates.is_empty() {
            let mut out = candidates;
            out.truncate(keep_top_k);
            return Ok(out);
        }

        let query_embedding = self.embedder.embed(&query.content).await?;

        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let candidate_embeddings = self.embedder.embed_batch(&texts).await?;

        let mut scored: Vec<(f32, SearchResult)> = candidates
            .into_iter()
            .zip(candidate_embeddings)
            .map(|(candidate, embedding)| {
                (cosine_similarity(&query_embedding, &embedding), candidate)
            })
            .collect();

        // Stable sort keeps input order among equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(keep_top_k);

        info!(kept = scored.len(), keep_top_k, "reranked candidates");
        Ok(scored.into_iter().map(|(_, c)| c).collect())
    }
}

/// Cosine similarity of two vectors; mismatched or empty inputs score 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for i in 0..a.len() {
        dot_product += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEmbedder, result};

    /// Maps revenue-flavored text near the x axis, everything else near y.
    fn axis_embed(text: &str) -> Vec<f32> {
        if text.to_lowercase().contains("revenue") {
            vec![1.0, 0.1]
        } else {
            vec![0.1, 1.0]
        }
    }

    #[tokio::test]
    async fn orders_by_similarity_to_the_query() {
        let reranker = Reranker::new(Arc::new(MockEmbedder::new(axis_embed)), false);
        let query = Query::from_str("What was revenue guidance for next quarter?");

        let out = reranker
            .rerank(
                &query,
                vec![
                    result("Headquarters moved to Austin.", Some(0.1)),
                    result("Revenue guidance for Q3 is $50M.", Some(0.9)),
                ],
                1,
            )
            .await
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Revenue guidance for Q3 is $50M.");
    }

    #[tokio::test]
    async fn large_k_returns_a_permutation() {
        let reranker = Reranker::new(Arc::new(MockEmbedder::new(axis_embed)), false);
        let query = Query::from_str("revenue?");
        let input = vec![
            result("alpha", None),
            result("revenue beta", None),
            result("gamma", None),
        ];

        let out = reranker.rerank(&query, input.clone(), 10).await.unwrap();
        assert_eq!(out.len(), input.len());
        for item in &input {
            assert!(out.contains(item));
        }
    }

    #[tokio::test]
    async fn empty_candidates_skip_the_embedder() {
        let embedder = Arc::new(MockEmbedder::new(axis_embed));
        let reranker = Reranker::new(embedder.clone(), false);
        let out = reranker
            .rerank(&Query::from_str("q"), Vec::new(), 3)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn mock_mode_truncates_in_input_order() {
        let embedder = Arc::new(MockEmbedder::new(axis_embed));
        let reranker = Reranker::new(embedder.clone(), true);
        let out = reranker
            .rerank(
                &Query::from_str("q"),
                vec![result("one", None), result("two", None), result("three", None)],
                2,
            )
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "one");
        assert_eq!(out[1].text, "two");
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn embedder_failure_is_surfaced() {
        let reranker = Reranker::new(Arc::new(MockEmbedder::failing()), false);
        let err = reranker
            .rerank(&Query::from_str("q"), vec![result("one", None)], 3)
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::VectorStore(_)));
    }

    #[test]
    fn cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    }
}
