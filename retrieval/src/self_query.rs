//! Self-query extraction: explicit filterable terms from free-text queries.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::error::RetrievalError;
use crate::llm::Completion;
use crate::prompts::{NO_TERMS_TOKEN, self_query_prompt};
use crate::query::Query;

/// Metadata key carrying the extracted comma-separated terms.
pub const EXTRACTED_TERMS_KEY: &str = "extracted_terms";

/// Extracts explicit financial/time key terms from a query.
pub struct SelfQuery {
    completion: Arc<dyn Completion>,
    mock: bool,
}

impl SelfQuery {
    /// Creates an extractor; `mock` returns the query unmodified.
    pub fn new(completion: Arc<dyn Completion>, mock: bool) -> Self {
        Self { completion, mock }
    }

    /// Returns the query augmented with `metadata.extracted_terms`.
    ///
    /// The terms string is stored verbatim; splitting and filtering happen
    /// in [`extracted_terms`]. The prompt anchors relative timeframes to
    /// today's date.
    ///
    /// # Errors
    /// Service errors surface to the caller, which falls back to the
    /// original query (extraction is a quality enhancement, never a hard
    /// dependency).
    pub async fn try_extract(&self, query: &Query) -> Result<Query, RetrievalError> {
        if self.mock {
            return Ok(query.clone());
        }

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let response = self
            .completion
            .complete(&self_query_prompt(&query.content, &today))
            .await?;
        let terms = response.trim_matches(['\n', ' ']).to_string();

        info!(terms = %terms, "extracted query terms");
        Ok(query.with_metadata(EXTRACTED_TERMS_KEY, Value::String(terms)))
    }
}

/// Splits the stored terms on commas, trimming and dropping blanks and the
/// literal `none` sentinel.
pub fn extracted_terms(query: &Query) -> Vec<String> {
    query
        .metadata
        .get(EXTRACTED_TERMS_KEY)
        .and_then(|v| v.as_str())
        .map(|terms| {
            terms
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(NO_TERMS_TOKEN))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    #[tokio::test]
    async fn stores_terms_verbatim() {
        let svc = Arc::new(MockCompletion::returning("revenue, guidance, next quarter\n"));
        let extractor = SelfQuery::new(svc, false);
        let out = extractor
            .try_extract(&Query::from_str("Revenue guidance for next quarter?"))
            .await
            .unwrap();
        assert_eq!(
            out.metadata.get(EXTRACTED_TERMS_KEY).and_then(|v| v.as_str()),
            Some("revenue, guidance, next quarter")
        );
    }

    #[tokio::test]
    async fn mock_mode_returns_query_unmodified() {
        let svc = Arc::new(MockCompletion::returning("unused"));
        let extractor = SelfQuery::new(svc.clone(), true);
        let query = Query::from_str("q");
        let out = extractor.try_extract(&query).await.unwrap();
        assert_eq!(out, query);
        assert_eq!(svc.calls(), 0);
    }

    #[test]
    fn terms_split_and_filter() {
        let q = Query::from_str("q").with_metadata(
            EXTRACTED_TERMS_KEY,
            Value::String("revenue,  guidance , , None".into()),
        );
        assert_eq!(extracted_terms(&q), vec!["revenue", "guidance"]);
    }

    #[test]
    fn missing_terms_yield_empty() {
        assert!(extracted_terms(&Query::from_str("q")).is_empty());
    }
}
