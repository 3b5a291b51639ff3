//! Query expansion: alternative phrasings to widen semantic recall.

use std::sync::Arc;

use tracing::debug;

use crate::error::RetrievalError;
use crate::llm::Completion;
use crate::prompts::{EXPANSION_SEPARATOR, expansion_prompt};
use crate::query::Query;

/// Expands a query into up to `n` variants via the generative service.
pub struct QueryExpansion {
    completion: Arc<dyn Completion>,
    mock: bool,
}

impl QueryExpansion {
    /// Creates an expander; `mock` skips the service and copies the query.
    pub fn new(completion: Arc<dyn Completion>, mock: bool) -> Self {
        Self { completion, mock }
    }

    /// Returns the original query first, followed by up to `expand_to_n - 1`
    /// model-generated paraphrases.
    ///
    /// One service call requests the alternatives separated by the fixed
    /// sentinel; segments are trimmed and empty ones dropped. A response with
    /// fewer segments than requested shortens the result, which is accepted.
    ///
    /// # Errors
    /// - [`RetrievalError::InvalidArgument`] when `expand_to_n == 0`
    /// - service errors from the completion call
    pub async fn expand(
        &self,
        query: &Query,
        expand_to_n: usize,
    ) -> Result<Vec<Query>, RetrievalError> {
        if expand_to_n == 0 {
            return Err(RetrievalError::InvalidArgument(
                "expand_to_n must be greater than 0".into(),
            ));
        }

        if self.mock {
            return Ok(vec![query.clone(); expand_to_n]);
        }

        let prompt = expansion_prompt(&query.content, expand_to_n - 1);
        let response = self.completion.complete(&prompt).await?;

        let mut queries = vec![query.clone()];
        queries.extend(
            response
                .split(EXPANSION_SEPARATOR)
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .take(expand_to_n - 1)
                .map(|segment| query.replace_content(segment)),
        );

        debug!(requested = expand_to_n, produced = queries.len(), "expanded query");
        Ok(queries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    #[tokio::test]
    async fn first_element_is_the_original() {
        let svc = Arc::new(MockCompletion::returning(
            "Variant one?#next-question#Variant two?",
        ));
        let expander = QueryExpansion::new(svc, false);
        let query = Query::from_str("What was revenue guidance?");

        let out = expander.expand(&query, 3).await.unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], query);
        assert_eq!(out[1].content, "Variant one?");
        assert_eq!(out[2].content, "Variant two?");
    }

    #[tokio::test]
    async fn fewer_segments_shorten_the_result() {
        let svc = Arc::new(MockCompletion::returning("Only one variant?"));
        let expander = QueryExpansion::new(svc, false);
        let query = Query::from_str("q");

        let out = expander.expand(&query, 3).await.unwrap();
        assert_eq!(out.len(), 2);
    }

    #[tokio::test]
    async fn empty_segments_are_dropped() {
        let svc = Arc::new(MockCompletion::returning(
            "  #next-question#Real variant?#next-question#   ",
        ));
        let expander = QueryExpansion::new(svc, false);
        let out = expander.expand(&Query::from_str("q"), 3).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].content, "Real variant?");
    }

    #[tokio::test]
    async fn zero_is_an_invalid_argument() {
        let svc = Arc::new(MockCompletion::returning("unused"));
        let expander = QueryExpansion::new(svc.clone(), false);
        let err = expander.expand(&Query::from_str("q"), 0).await.unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidArgument(_)));
        assert_eq!(svc.calls(), 0);
    }

    #[tokio::test]
    async fn mock_mode_copies_without_service_calls() {
        let svc = Arc::new(MockCompletion::returning("unused"));
        let expander = QueryExpansion::new(svc.clone(), true);
        let query = Query::from_str("q");

        let out = expander.expand(&query, 3).await.unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|q| q.content == "q"));
        assert_eq!(svc.calls(), 0);
    }
}
