//! Vector index for earnings-call chunks: ingestion + retrieval over Qdrant.
//!
//! This crate provides a clean API to:
//! - Ingest transcripts (clean → chunk → tag → embed → upsert)
//! - Search top-K chunks for a textual query, with optional tag filtering
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod embed;
mod errors;
mod filters;
mod handlers;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{DistanceKind, VectorConfig, VectorSpace};
pub use embed::{EmbeddingsProvider, ProfilesEmbedder};
pub use errors::VectorStoreError;
pub use filters::{TagFilter, to_qdrant_filter};
pub use handlers::{PrepStrategy, strategy_for};
pub use record::{DataCategory, EmbeddedChunk, SearchResult, TranscriptChunk};

use tracing::{debug, trace};
use transcript_store::TranscriptStore;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct TranscriptIndex {
    cfg: VectorConfig,
    client: qdrant_facade::QdrantFacade,
}

impl TranscriptIndex {
    /// Constructs a new index from the given configuration.
    ///
    /// # Errors
    /// Returns `VectorStoreError::Config` if the client initialization fails.
    pub fn new(cfg: VectorConfig) -> Result<Self, VectorStoreError> {
        trace!("TranscriptIndex::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Ingests every transcript in the document store.
    ///
    /// # Errors
    /// Returns errors on store access, embedding, vector size mismatch, or
    /// Qdrant failures.
    pub async fn ingest_from_store(
        &self,
        store: &TranscriptStore,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<u64, VectorStoreError> {
        debug!("TranscriptIndex::ingest_from_store");
        ingest::ingest_from_store(&self.cfg, store, provider, &self.client).await
    }

    /// Ingests the given transcript documents directly.
    ///
    /// # Errors
    /// Returns errors on embedding, vector size mismatch, or Qdrant failures.
    pub async fn ingest_documents(
        &self,
        docs: &[transcript_store::TranscriptDocument],
        provider: &dyn EmbeddingsProvider,
    ) -> Result<u64, VectorStoreError> {
        trace!("TranscriptIndex::ingest_documents count={}", docs.len());
        ingest::ingest_documents(&self.cfg, docs, provider, &self.client).await
    }

    /// Performs a low-level vector search and returns `(score, payload)` tuples.
    ///
    /// # Errors
    /// Returns `VectorStoreError::Qdrant` if search fails.
    pub async fn search_by_vector(
        &self,
        query_vector: Vec<f32>,
        limit: u64,
        filter: Option<&TagFilter>,
    ) -> Result<Vec<(f32, serde_json::Value)>, VectorStoreError> {
        trace!("TranscriptIndex::search_by_vector limit={limit}");
        let qfilter = filter.map(to_qdrant_filter);
        retrieve::search_by_vector(&self.client, query_vector, limit, qfilter).await
    }

    /// Searches chunks similar to a textual query using the provided embedder.
    ///
    /// # Errors
    /// Returns embedding errors or Qdrant failures.
    pub async fn search_similar(
        &self,
        query_text: &str,
        limit: u64,
        filter: Option<&TagFilter>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        trace!("TranscriptIndex::search_similar limit={limit}");
        retrieve::search_similar(&self.client, query_text, limit, filter, provider).await
    }
}
