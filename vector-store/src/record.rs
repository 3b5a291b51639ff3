//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use services::uuid::stable_uuid;
use uuid::Uuid;

/// Logical category of an indexed record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataCategory {
    /// User queries (embedded ad hoc, never persisted).
    Queries,
    /// Earnings-call transcript chunks.
    EarningsCalls,
}

impl DataCategory {
    /// Stable string form used in payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Queries => "queries",
            DataCategory::EarningsCalls => "earnings_calls",
        }
    }
}

/// A bounded-size transcript fragment, the unit of embedding and retrieval.
///
/// The identity is derived from the content, so re-ingesting identical text
/// produces the identical chunk id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscriptChunk {
    pub id: Uuid,
    pub content: String,
    pub category: DataCategory,
    pub document_id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl TranscriptChunk {
    /// Creates a chunk with a content-derived deterministic id.
    pub fn new(
        content: impl Into<String>,
        category: DataCategory,
        document_id: Uuid,
        company_id: Uuid,
        company_name: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Self {
        let content = content.into();
        Self {
            id: stable_uuid(&content),
            content,
            category,
            document_id,
            company_id,
            company_name: company_name.into(),
            metadata,
        }
    }
}

/// A [`TranscriptChunk`] paired with its embedding vector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub chunk: TranscriptChunk,
    pub embedding: Vec<f32>,
}

/// A single retrieval hit.
///
/// `score` is `None` when the backend does not report one; ranking then
/// degrades to insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub score: Option<f32>,
}

impl SearchResult {
    /// Creates a result from text, metadata and an optional score.
    pub fn new(text: impl Into<String>, metadata: Map<String, Value>, score: Option<f32>) -> Self {
        Self {
            text: text.into(),
            metadata,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> TranscriptChunk {
        TranscriptChunk::new(
            content,
            DataCategory::EarningsCalls,
            Uuid::nil(),
            Uuid::nil(),
            "Acme Corp",
            Map::new(),
        )
    }

    #[test]
    fn chunk_ids_are_deterministic() {
        assert_eq!(chunk("Revenue was $50M.").id, chunk("Revenue was $50M.").id);
    }

    #[test]
    fn chunk_ids_differ_per_content() {
        assert_ne!(chunk("Revenue was $50M.").id, chunk("Revenue was $51M.").id);
    }

    #[test]
    fn category_strings_are_stable() {
        assert_eq!(DataCategory::EarningsCalls.as_str(), "earnings_calls");
        assert_eq!(DataCategory::Queries.as_str(), "queries");
    }
}
