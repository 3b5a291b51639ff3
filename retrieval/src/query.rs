//! Query model and intent classification.

use serde_json::{Map, Value};
use tracing::warn;

/// A user question flowing through the retrieval pipeline.
///
/// Queries are value types: `replace_content` returns a new query sharing
/// category/metadata with new content, never mutating in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub content: String,
    pub category: Option<String>,
    pub metadata: Map<String, Value>,
}

impl Query {
    /// Creates a query from raw input, trimming surrounding whitespace.
    pub fn from_str(raw: &str) -> Self {
        Self {
            content: raw.trim_matches(['\n', ' ']).to_string(),
            category: None,
            metadata: Map::new(),
        }
    }

    /// Returns a copy with new content, sharing category and metadata.
    pub fn replace_content(&self, new_content: impl Into<String>) -> Self {
        Self {
            content: new_content.into(),
            category: self.category.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a copy with one metadata entry added.
    pub fn with_metadata(&self, key: impl Into<String>, value: Value) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.insert(key.into(), value);
        Self {
            content: self.content.clone(),
            category: self.category.clone(),
            metadata,
        }
    }
}

/// Classification of a user query: metadata lookup vs. semantic search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryIntent {
    /// Pure metadata question answered from the document store.
    Metadata,
    /// Company + timeframe lookup answered from the document store.
    CompanyTimeframe,
    /// Company + topic lookup answered from the document store.
    CompanyTopic,
    /// Everything else; routed through vector search.
    General,
}

impl QueryIntent {
    /// Maps an upper-cased intent string to the enum.
    ///
    /// Unknown strings fall back to [`QueryIntent::General`] with a warning;
    /// intent misdetection must never block retrieval.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "METADATA" => QueryIntent::Metadata,
            "COMPANY_TIMEFRAME" => QueryIntent::CompanyTimeframe,
            "COMPANY_TOPIC" => QueryIntent::CompanyTopic,
            "GENERAL" => QueryIntent::General,
            other => {
                warn!("Unknown intent: {other}, defaulting to GENERAL");
                QueryIntent::General
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_trims() {
        let q = Query::from_str("\n  What was revenue guidance?  \n");
        assert_eq!(q.content, "What was revenue guidance?");
        assert!(q.category.is_none());
        assert!(q.metadata.is_empty());
    }

    #[test]
    fn replace_content_shares_category_and_metadata() {
        let q = Query::from_str("original")
            .with_metadata("extracted_terms", Value::String("revenue".into()));
        let replaced = q.replace_content("rephrased");
        assert_eq!(replaced.content, "rephrased");
        assert_eq!(replaced.metadata, q.metadata);
        // The original is untouched.
        assert_eq!(q.content, "original");
    }

    #[test]
    fn intent_labels_map_case_insensitively() {
        assert_eq!(QueryIntent::from_label("metadata"), QueryIntent::Metadata);
        assert_eq!(
            QueryIntent::from_label("Company_Timeframe"),
            QueryIntent::CompanyTimeframe
        );
        assert_eq!(QueryIntent::from_label("COMPANY_TOPIC"), QueryIntent::CompanyTopic);
        assert_eq!(QueryIntent::from_label("nonsense"), QueryIntent::General);
    }
}
