//! Intent detection: metadata lookup vs. general semantic search.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RetrievalError;
use crate::llm::Completion;
use crate::prompts::intent_prompt;
use crate::query::{Query, QueryIntent};

/// Detects query intent and an optional structured database query.
pub struct IntentDetector {
    completion: Arc<dyn Completion>,
    mock: bool,
}

/// Strict JSON shape demanded from the model.
#[derive(Debug, Deserialize)]
struct IntentResponse {
    intent: String,
    #[allow(dead_code)]
    reasoning: Option<String>,
    #[serde(default)]
    mongo_query: Option<Value>,
}

impl IntentDetector {
    /// Creates a detector; `mock` short-circuits to `(General, None)`.
    pub fn new(completion: Arc<dyn Completion>, mock: bool) -> Self {
        Self { completion, mock }
    }

    /// Classifies the query via one completion call.
    ///
    /// Unknown intent labels map to [`QueryIntent::General`] with a warning.
    /// Service failures and unparseable responses surface as errors; callers
    /// map them to `(General, None)` so misdetection never blocks retrieval.
    ///
    /// # Errors
    /// - service errors from the completion call
    /// - [`RetrievalError::MalformedResponse`] when the JSON cannot be parsed
    pub async fn try_detect(
        &self,
        query: &Query,
    ) -> Result<(QueryIntent, Option<Value>), RetrievalError> {
        if self.mock {
            return Ok((QueryIntent::General, None));
        }

        let response = self.completion.complete(&intent_prompt(&query.content)).await?;
        let detected = parse_intent_response(&response)?;
        info!(intent = ?detected.0, has_query = detected.1.is_some(), "detected intent");
        Ok(detected)
    }
}

/// Parses the model response: strips markdown fences, parses strict JSON,
/// and maps the intent label.
fn parse_intent_response(response: &str) -> Result<(QueryIntent, Option<Value>), RetrievalError> {
    let content = response
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    let parsed: IntentResponse = serde_json::from_str(&content).map_err(|e| {
        RetrievalError::MalformedResponse(format!("intent JSON: {e}"))
    })?;

    let intent = QueryIntent::from_label(&parsed.intent);
    let mongo_query = parsed.mongo_query.filter(|v| !v.is_null());

    debug!(label = %parsed.intent, ?intent, "parsed intent response");
    Ok((intent, mongo_query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    #[tokio::test]
    async fn parses_strict_json() {
        let svc = Arc::new(MockCompletion::returning(
            r#"{"intent": "metadata", "reasoning": "count question", "mongo_query": {"metadata.type": "earnings_call", "$count": "document_count"}}"#,
        ));
        let detector = IntentDetector::new(svc, false);
        let (intent, payload) = detector
            .try_detect(&Query::from_str("How many transcripts do you have?"))
            .await
            .unwrap();
        assert_eq!(intent, QueryIntent::Metadata);
        assert_eq!(
            payload.unwrap()["$count"],
            serde_json::json!("document_count")
        );
    }

    #[tokio::test]
    async fn strips_markdown_fences() {
        let svc = Arc::new(MockCompletion::returning(
            "```json\n{\"intent\": \"GENERAL\", \"reasoning\": \"-\", \"mongo_query\": null}\n```",
        ));
        let detector = IntentDetector::new(svc, false);
        let (intent, payload) = detector.try_detect(&Query::from_str("q")).await.unwrap();
        assert_eq!(intent, QueryIntent::General);
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn unknown_label_defaults_to_general() {
        let svc = Arc::new(MockCompletion::returning(
            r#"{"intent": "WEATHER", "reasoning": "-", "mongo_query": null}"#,
        ));
        let detector = IntentDetector::new(svc, false);
        let (intent, _) = detector.try_detect(&Query::from_str("q")).await.unwrap();
        assert_eq!(intent, QueryIntent::General);
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let svc = Arc::new(MockCompletion::returning("not json at all"));
        let detector = IntentDetector::new(svc, false);
        let err = detector.try_detect(&Query::from_str("q")).await.unwrap_err();
        assert!(matches!(err, RetrievalError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn mock_mode_skips_the_service() {
        let svc = Arc::new(MockCompletion::returning("unused"));
        let detector = IntentDetector::new(svc.clone(), true);
        let (intent, payload) = detector.try_detect(&Query::from_str("q")).await.unwrap();
        assert_eq!(intent, QueryIntent::General);
        assert!(payload.is_none());
        assert_eq!(svc.calls(), 0);
    }
}
