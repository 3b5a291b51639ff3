//! Runtime and collection configuration.

use crate::errors::VectorStoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for vector ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct VectorConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Upsert batch size (typical range: 128..512).
    pub upsert_batch: usize,
    /// Expected embedding dimensionality; probed from the first embedding
    /// when unset.
    pub embedding_dim: Option<usize>,
    /// Chunking: maximum chunk size in characters.
    pub chunk_size: usize,
    /// Chunking: trailing-sentence overlap budget in characters.
    pub chunk_overlap: usize,
}

impl VectorConfig {
    /// Creates a sane default config for a given collection name and endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
            embedding_dim: None,
            chunk_size: 1000,
            chunk_overlap: 100,
        }
    }

    /// Builds the config from environment variables.
    ///
    /// Env: `QDRANT_URL`, `QDRANT_API_KEY`, `QDRANT_COLLECTION`,
    /// `EMBEDDING_DIMENSION`, `CHUNK_SIZE`, `CHUNK_OVERLAP`.
    pub fn from_env() -> Self {
        let mut cfg = Self::new_default(
            std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".to_string()),
            std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "earnings_calls".to_string()),
        );
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY").ok().filter(|s| !s.is_empty());
        cfg.embedding_dim = std::env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|s| s.parse::<usize>().ok());
        if let Some(size) = std::env::var("CHUNK_SIZE").ok().and_then(|s| s.parse().ok()) {
            cfg.chunk_size = size;
        }
        if let Some(overlap) = std::env::var("CHUNK_OVERLAP").ok().and_then(|s| s.parse().ok()) {
            cfg.chunk_overlap = overlap;
        }
        cfg
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), VectorStoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(VectorStoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(VectorStoreError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(VectorStoreError::Config("upsert_batch must be > 0".into()));
        }
        if self.chunk_size == 0 {
            return Err(VectorStoreError::Config("chunk_size must be > 0".into()));
        }
        Ok(())
    }
}
