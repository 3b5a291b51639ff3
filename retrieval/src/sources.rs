//! Seam traits over the stores, plus production implementations.
//!
//! The orchestrator talks to the vector index and the document store only
//! through these traits, so collaborators are dependency-injected and tests
//! swap in counting mocks.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use serde_json::Value;
use transcript_store::TranscriptStore;
use vector_store::{EmbeddingsProvider, SearchResult, TagFilter, TranscriptIndex};

use crate::error::RetrievalError;

/// Similarity search over the vector index.
pub trait VectorSearcher: Send + Sync {
    /// Searches for chunks similar to `query_text`, optionally restricted by
    /// a tag filter.
    fn search<'a>(
        &'a self,
        query_text: &'a str,
        limit: u64,
        filter: Option<&'a TagFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>>;
}

/// Structured-query execution against the document store.
pub trait DocumentQuery: Send + Sync {
    /// Executes an intent-detection payload and returns record results.
    fn execute<'a>(
        &'a self,
        query: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>>;
}

/// Production [`VectorSearcher`] backed by the Qdrant index.
pub struct IndexSearcher {
    index: Arc<TranscriptIndex>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl IndexSearcher {
    pub fn new(index: Arc<TranscriptIndex>, embedder: Arc<dyn EmbeddingsProvider>) -> Self {
        Self { index, embedder }
    }
}

impl VectorSearcher for IndexSearcher {
    fn search<'a>(
        &'a self,
        query_text: &'a str,
        limit: u64,
        filter: Option<&'a TagFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(async move {
            let hits = self
                .index
                .search_similar(query_text, limit, filter, self.embedder.as_ref())
                .await?;
            Ok(hits)
        })
    }
}

/// Production [`DocumentQuery`] backed by the MongoDB store.
pub struct StoreQuerier {
    store: Arc<TranscriptStore>,
}

impl StoreQuerier {
    pub fn new(store: Arc<TranscriptStore>) -> Self {
        Self { store }
    }
}

impl DocumentQuery for StoreQuerier {
    fn execute<'a>(
        &'a self,
        query: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(async move {
            let docs = self.store.execute_structured(query).await?;
            Ok(docs
                .into_iter()
                .map(|d| {
                    let metadata = d.metadata_json();
                    SearchResult::new(d.content, metadata, None)
                })
                .collect())
        })
    }
}
