//! Interpretation of structured queries produced by intent detection.
//!
//! The intent detector emits a JSON payload shaped like a MongoDB filter,
//! optionally carrying a `$count` key whose value names the output field:
//! `{"metadata.type": "earnings_call", "$count": "document_count"}`.

use mongodb::bson::{self, Document};
use serde_json::Value;

use crate::errors::StoreError;

/// A parsed structured query: a plain filter plus an optional count alias.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    /// Equality filter applied to the collection.
    pub filter: Document,
    /// When set, the query is a count aggregation; the string names the
    /// metadata field carrying the count in the synthesized result.
    pub count_alias: Option<String>,
}

/// Parses the intent detector's `mongo_query` payload.
///
/// # Errors
/// Returns [`StoreError::InvalidStructuredQuery`] if the payload is not a
/// JSON object or a filter value cannot be represented in BSON.
pub fn parse_structured_query(query: &Value) -> Result<StructuredQuery, StoreError> {
    let map = query.as_object().ok_or_else(|| {
        StoreError::InvalidStructuredQuery(format!("expected JSON object, got: {query}"))
    })?;

    let mut filter = Document::new();
    let mut count_alias = None;

    for (key, value) in map {
        if key == "$count" {
            count_alias = Some(
                value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| "count".to_string()),
            );
            continue;
        }

        let b = bson::to_bson(value).map_err(|e| {
            StoreError::InvalidStructuredQuery(format!("filter value for `{key}`: {e}"))
        })?;
        filter.insert(key.clone(), b);
    }

    Ok(StructuredQuery {
        filter,
        count_alias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn parses_count_query() {
        let q = serde_json::json!({
            "metadata.type": "earnings_call",
            "$count": "document_count"
        });
        let parsed = parse_structured_query(&q).unwrap();
        assert_eq!(parsed.filter, doc! { "metadata.type": "earnings_call" });
        assert_eq!(parsed.count_alias.as_deref(), Some("document_count"));
    }

    #[test]
    fn parses_plain_filter() {
        let q = serde_json::json!({ "metadata.company": "Salesforce" });
        let parsed = parse_structured_query(&q).unwrap();
        assert_eq!(parsed.filter, doc! { "metadata.company": "Salesforce" });
        assert!(parsed.count_alias.is_none());
    }

    #[test]
    fn rejects_non_object() {
        assert!(parse_structured_query(&serde_json::json!([1, 2, 3])).is_err());
    }
}
