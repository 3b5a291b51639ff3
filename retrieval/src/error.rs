//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for retrieval operations.
///
/// Collaborator failures are wrapped so graceful-degradation fallbacks stay
/// visible at call sites: the pipeline maps specific error branches to
/// defaults instead of hiding them in a catch-all.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// A caller-supplied argument is out of range (fails fast).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Generative/embedding service failure.
    #[error("llm service error: {0}")]
    Llm(#[from] llm_service::LlmError),

    /// Vector index failure.
    #[error("vector store error: {0}")]
    VectorStore(#[from] vector_store::VectorStoreError),

    /// Document store failure.
    #[error("document store error: {0}")]
    Store(#[from] transcript_store::StoreError),

    /// The generative service returned something unparseable.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}
