//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for transcript-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// MongoDB driver errors (wrapped).
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// BSON serialization errors when converting JSON filters.
    #[error("bson error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A structured query payload that cannot be interpreted.
    #[error("invalid structured query: {0}")]
    InvalidStructuredQuery(String),
}
