//! End-to-end ingestion pipeline: fetch transcripts → clean → chunk → tag →
//! embed → upsert into Qdrant.
//!
//! Chunk texts of one upsert batch are embedded in a single provider call;
//! a failing batch fails as a whole and the error propagates. The stored
//! payload is a vector + compact payload (text + tags + metadata).

use std::collections::HashSet;

use qdrant_client::qdrant::{
    ListValue, PointId, PointStruct, Struct, Value as QValue, Vector, Vectors, value, vectors,
};
use serde_json::{Map, Value};
use services::uuid::stable_uuid;
use tracing::{debug, info, warn};
use transcript_prep::{financial_keywords, tag_text};
use transcript_store::{TranscriptDocument, TranscriptStore, bson};
use uuid::Uuid;

use crate::config::{VectorConfig, VectorSpace};
use crate::embed::EmbeddingsProvider;
use crate::errors::VectorStoreError;
use crate::handlers::strategy_for;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{DataCategory, EmbeddedChunk, TranscriptChunk};

/// Ingests every transcript currently in the document store.
///
/// Uses [`ingest_documents`] internally.
pub async fn ingest_from_store(
    cfg: &VectorConfig,
    store: &TranscriptStore,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<u64, VectorStoreError> {
    let docs = store.find_transcripts(bson::Document::new()).await?;
    info!("Ingesting {} transcripts from document store", docs.len());
    ingest_documents(cfg, &docs, provider, client).await
}

/// Ingests the given transcript documents.
///
/// 1. Clean and chunk each document's content.
/// 2. Tag every chunk against the financial vocabulary.
/// 3. Batch-embed and upsert points.
///
/// # Errors
/// Returns errors on embedding failures, vector size mismatch, or Qdrant
/// failures. There is no partial success within an embedding batch.
pub async fn ingest_documents(
    cfg: &VectorConfig,
    docs: &[TranscriptDocument],
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<u64, VectorStoreError> {
    let mut chunks = build_chunks(cfg, docs);
    if chunks.is_empty() {
        debug!("No chunks produced from documents");
        return Ok(0);
    }

    dedup_in_place(&mut chunks);

    let vector_size = determine_vector_size(&chunks, provider, cfg.embedding_dim).await?;
    debug!("Vector size determined: {}", vector_size);

    client
        .ensure_collection(&VectorSpace {
            size: vector_size,
            distance: cfg.distance,
        })
        .await?;

    // Embed and upsert in batches; each batch is one embedding call.
    let mut total: u64 = 0;
    let batch_size = cfg.upsert_batch.max(1);
    for batch in chunks.chunks(batch_size) {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let vectors = provider.embed_batch(&texts).await?;

        let mut embedded = Vec::with_capacity(batch.len());
        for (chunk, vector) in batch.iter().cloned().zip(vectors) {
            if vector.len() != vector_size {
                return Err(VectorStoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want: vector_size,
                });
            }
            embedded.push(EmbeddedChunk {
                chunk,
                embedding: vector,
            });
        }

        let points = embedded.iter().map(build_point).collect();
        total += client.upsert_points(points).await?;
    }

    info!("Ingested {} chunks", total);
    Ok(total)
}

// ---------- helpers ----------

/// Cleans, chunks and tags all documents into chunk records.
fn build_chunks(cfg: &VectorConfig, docs: &[TranscriptDocument]) -> Vec<TranscriptChunk> {
    let keywords = financial_keywords();
    let strategy = strategy_for(DataCategory::EarningsCalls);
    let mut out = Vec::new();

    for doc in docs {
        let cleaned = (strategy.clean)(&doc.content);
        if cleaned.is_empty() {
            warn!("Skipping transcript with empty content");
            continue;
        }

        let doc_meta = doc.metadata_json();
        let document_id = doc
            .id
            .as_ref()
            .map(|oid| stable_uuid(&oid.to_hex()))
            .unwrap_or_else(|| stable_uuid(&cleaned));
        let company_name = doc_meta
            .get("company_name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        let company_id = doc_meta
            .get("company_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(|| stable_uuid(&company_name));

        for text in (strategy.chunk)(&cleaned, cfg.chunk_size, cfg.chunk_overlap) {
            let tags = tag_text(&text, &keywords);
            let mut metadata: Map<String, Value> = doc_meta.clone();
            metadata.insert(
                "tags".to_string(),
                Value::Array(tags.into_iter().map(Value::String).collect()),
            );

            out.push(TranscriptChunk::new(
                text,
                DataCategory::EarningsCalls,
                document_id,
                company_id,
                company_name.clone(),
                metadata,
            ));
        }
    }

    out
}

/// Drops chunks with duplicate identities (identical content), keeping the
/// first occurrence.
fn dedup_in_place(chunks: &mut Vec<TranscriptChunk>) {
    let mut seen: HashSet<Uuid> = HashSet::with_capacity(chunks.len());
    chunks.retain(|c| seen.insert(c.id));
}

/// Determines the embedding dimensionality.
///
/// Uses the configured value, or probes the provider with the first chunk.
async fn determine_vector_size(
    chunks: &[TranscriptChunk],
    provider: &dyn EmbeddingsProvider,
    expected_dim: Option<usize>,
) -> Result<usize, VectorStoreError> {
    if let Some(dim) = expected_dim {
        return Ok(dim);
    }
    let v = provider.embed(&chunks[0].content).await?;
    Ok(v.len())
}

/// Builds a Qdrant point from an embedded chunk.
///
/// Payload layout: `text`, `category`, `document_id`, `company_id`,
/// `company_name`, `tags` (list), plus remaining metadata fields.
fn build_point(embedded: &EmbeddedChunk) -> PointStruct {
    let chunk = &embedded.chunk;
    let mut payload: std::collections::HashMap<String, QValue> = std::collections::HashMap::new();

    payload.insert("text".into(), qstring(&chunk.content));
    payload.insert("category".into(), qstring(chunk.category.as_str()));
    payload.insert(
        "document_id".into(),
        qstring(&chunk.document_id.to_string()),
    );
    payload.insert("company_id".into(), qstring(&chunk.company_id.to_string()));
    payload.insert("company_name".into(), qstring(&chunk.company_name));

    for (k, v) in chunk.metadata.iter() {
        payload.insert(k.clone(), json_to_qvalue(v.clone()));
    }

    let pid: PointId = chunk.id.to_string().into();

    let vectors = Vectors {
        vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
            data: embedded.embedding.clone(),
            indices: None,
            vectors_count: None,
            vector: None,
        })),
    };

    PointStruct {
        id: Some(pid),
        payload,
        vectors: Some(vectors),
        ..Default::default()
    }
}

fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(value::Kind::StringValue(s.to_string())),
    }
}

/// Converts a JSON value into a Qdrant payload value, recursing into arrays
/// and objects.
fn json_to_qvalue(v: Value) -> QValue {
    let kind = match v {
        Value::Null => value::Kind::NullValue(0),
        Value::Bool(b) => value::Kind::BoolValue(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                value::Kind::IntegerValue(i)
            } else {
                value::Kind::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => value::Kind::StringValue(s),
        Value::Array(items) => value::Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_qvalue).collect(),
        }),
        Value::Object(map) => value::Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qvalue(v)))
                .collect(),
        }),
    };
    QValue { kind: Some(kind) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_store::bson::doc;

    fn test_cfg() -> VectorConfig {
        let mut cfg = VectorConfig::new_default("http://localhost:6334", "test");
        cfg.chunk_size = 80;
        cfg.chunk_overlap = 0;
        cfg
    }

    #[test]
    fn builds_tagged_chunks() {
        let doc = TranscriptDocument::new(
            "Revenue guidance for the next quarter was raised. The CFO discussed free cash flow in detail.",
            doc! { "company_name": "Acme Corp" },
        );
        let chunks = build_chunks(&test_cfg(), &[doc]);
        assert!(!chunks.is_empty());

        let all_tags: Vec<String> = chunks
            .iter()
            .filter_map(|c| c.metadata.get("tags"))
            .filter_map(|v| v.as_array())
            .flatten()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        assert!(all_tags.iter().any(|t| t == "guidance"));
        assert!(chunks.iter().all(|c| c.company_name == "Acme Corp"));
    }

    #[test]
    fn dedup_drops_identical_content() {
        let doc = TranscriptDocument::new("Same sentence here.", doc! {});
        let mut chunks = build_chunks(&test_cfg(), &[doc.clone(), doc]);
        dedup_in_place(&mut chunks);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn empty_documents_produce_no_chunks() {
        let doc = TranscriptDocument::new("   ", doc! {});
        assert!(build_chunks(&test_cfg(), &[doc]).is_empty());
    }
}
