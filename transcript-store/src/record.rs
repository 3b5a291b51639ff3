//! Core data models used by the library.

use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical transcript document as stored in MongoDB.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Assigned by MongoDB on insert; absent on new documents.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub content: String,
    #[serde(default)]
    pub metadata: Document,
}

impl TranscriptDocument {
    /// Creates an unsaved document from content and metadata.
    pub fn new(content: impl Into<String>, metadata: Document) -> Self {
        Self {
            id: None,
            content: content.into(),
            metadata,
        }
    }

    /// Converts the BSON metadata into a plain JSON map.
    ///
    /// Values that cannot be represented in JSON are skipped.
    pub fn metadata_json(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (k, v) in self.metadata.iter() {
            if let Ok(j) = serde_json::to_value(v) {
                out.insert(k.clone(), j);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn metadata_roundtrips_to_json() {
        let d = TranscriptDocument::new(
            "Revenue guidance for Q3 is $50M.",
            doc! { "type": "earnings_call", "quarter": 3_i32 },
        );
        let m = d.metadata_json();
        assert_eq!(m.get("type").and_then(|v| v.as_str()), Some("earnings_call"));
        assert_eq!(m.get("quarter").and_then(|v| v.as_i64()), Some(3));
    }
}
