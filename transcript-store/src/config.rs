//! Runtime configuration for the document store.

use crate::errors::StoreError;

/// Configuration for the MongoDB-backed transcript store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Collection holding transcript documents.
    pub collection: String,
}

impl StoreConfig {
    /// Builds the config from environment variables.
    ///
    /// Env: `MONGODB_URI` (default `mongodb://localhost:27017`),
    /// `MONGODB_DATABASE`, `MONGODB_COLLECTION`.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if database/collection are unset.
    pub fn from_env() -> Result<Self, StoreError> {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database = std::env::var("MONGODB_DATABASE")
            .map_err(|_| StoreError::Config("MONGODB_DATABASE is not set".into()))?;
        let collection = std::env::var("MONGODB_COLLECTION")
            .map_err(|_| StoreError::Config("MONGODB_COLLECTION is not set".into()))?;

        let cfg = Self {
            uri,
            database,
            collection,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.uri.trim().is_empty() {
            return Err(StoreError::Config("uri is empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(StoreError::Config("database is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
