//! Retrieval helpers: low-level vector search and text-query search.

use crate::embed::EmbeddingsProvider;
use crate::errors::VectorStoreError;
use crate::filters::{TagFilter, to_qdrant_filter};
use crate::qdrant_facade::QdrantFacade;
use crate::record::SearchResult;

use qdrant_client::qdrant::Filter;
use serde_json::Value;
use tracing::trace;

/// Performs a low-level similarity search given a ready query vector.
///
/// # Errors
/// Returns `VectorStoreError::Qdrant` on client failures.
pub async fn search_by_vector(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    limit: u64,
    filter: Option<Filter>,
) -> Result<Vec<(f32, Value)>, VectorStoreError> {
    trace!("retrieve::search_by_vector limit={limit}");
    let res = client.search(query_vector, limit, filter).await?;
    Ok(res)
}

/// Embeds the query text and returns normalized search results.
///
/// The payload's `text` field becomes the result text; everything else is
/// carried as metadata.
///
/// # Errors
/// Returns embedding/provider errors or Qdrant failures.
pub async fn search_similar(
    client: &QdrantFacade,
    query_text: &str,
    limit: u64,
    filter: Option<&TagFilter>,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<SearchResult>, VectorStoreError> {
    trace!(
        "retrieve::search_similar limit={} filtered={}",
        limit,
        filter.is_some()
    );

    let qv = provider.embed(query_text).await?;
    let qfilter = filter.map(to_qdrant_filter);

    let hits = search_by_vector(client, qv, limit, qfilter).await?;

    let mut out = Vec::with_capacity(hits.len());
    for (score, payload) in hits {
        let mut metadata = match payload {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let text = metadata
            .remove("text")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        out.push(SearchResult::new(text, metadata, Some(score)));
    }

    trace!("retrieve::search_similar hits={}", out.len());
    Ok(out)
}
