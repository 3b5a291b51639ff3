//! MongoDB document store for earnings-call transcripts.
//!
//! This crate provides a narrow interface over one transcript collection:
//! - `find` / `insert_many` / `delete_many` / `count_documents`
//! - execution of structured intent queries (`$count` shorthand)
//!
//! The client is explicitly constructed via [`TranscriptStore::connect`] and
//! released via [`TranscriptStore::close`]; nothing here is a process-wide
//! singleton, so callers own the lifecycle.

mod config;
mod errors;
mod record;
mod structured;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use record::TranscriptDocument;
pub use structured::{StructuredQuery, parse_structured_query};

// Re-exported so dependents can build filters without a direct driver dependency.
pub use mongodb::bson;

use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::{debug, info, trace};

/// Handle to the transcript collection with an explicit lifecycle.
pub struct TranscriptStore {
    client: Client,
    collection: Collection<Document>,
}

impl TranscriptStore {
    /// Connects to MongoDB and binds the configured collection.
    ///
    /// # Errors
    /// Returns `StoreError::Config` for invalid config and
    /// `StoreError::Mongo` if the client cannot be created.
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let client = Client::with_uri_str(&cfg.uri).await?;
        let collection = client
            .database(&cfg.database)
            .collection::<Document>(&cfg.collection);

        info!(
            database = %cfg.database,
            collection = %cfg.collection,
            "connected to MongoDB"
        );

        Ok(Self { client, collection })
    }

    /// Shuts the client down, releasing all pooled connections.
    pub async fn close(self) {
        info!("closing MongoDB client");
        self.client.shutdown().await;
    }

    /// Finds raw records matching `filter`, optionally with a projection.
    ///
    /// # Errors
    /// Returns `StoreError::Mongo` on driver failures.
    pub async fn find(
        &self,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        trace!(?filter, "store::find");
        let mut query = self.collection.find(filter);
        if let Some(p) = projection {
            query = query.projection(p);
        }
        let docs: Vec<Document> = query.await?.try_collect().await?;
        debug!(count = docs.len(), "store::find completed");
        Ok(docs)
    }

    /// Finds transcripts matching `filter` as typed documents.
    ///
    /// Records that fail to deserialize are skipped.
    ///
    /// # Errors
    /// Returns `StoreError::Mongo` on driver failures.
    pub async fn find_transcripts(
        &self,
        filter: Document,
    ) -> Result<Vec<TranscriptDocument>, StoreError> {
        let docs = self.find(filter, None).await?;
        Ok(docs
            .into_iter()
            .filter_map(|d| mongodb::bson::from_document(d).ok())
            .collect())
    }

    /// Inserts a batch of transcript documents.
    ///
    /// # Errors
    /// Returns `StoreError::Mongo` on driver failures.
    pub async fn insert_many(&self, docs: &[TranscriptDocument]) -> Result<usize, StoreError> {
        if docs.is_empty() {
            debug!("no documents provided for insert");
            return Ok(0);
        }

        let typed = self.collection.clone_with_type::<TranscriptDocument>();
        let res = typed.insert_many(docs).await?;
        info!(inserted = res.inserted_ids.len(), "store::insert_many completed");
        Ok(res.inserted_ids.len())
    }

    /// Deletes all records matching `filter`, returning the deleted count.
    ///
    /// # Errors
    /// Returns `StoreError::Mongo` on driver failures.
    pub async fn delete_many(&self, filter: Document) -> Result<u64, StoreError> {
        let res = self.collection.delete_many(filter).await?;
        info!(deleted = res.deleted_count, "store::delete_many completed");
        Ok(res.deleted_count)
    }

    /// Counts records matching `filter`.
    ///
    /// # Errors
    /// Returns `StoreError::Mongo` on driver failures.
    pub async fn count_documents(&self, filter: Document) -> Result<u64, StoreError> {
        let n = self.collection.count_documents(filter).await?;
        debug!(count = n, "store::count_documents completed");
        Ok(n)
    }

    /// Executes a structured query from the intent detector.
    ///
    /// A `$count` payload yields a single synthetic document whose metadata
    /// carries the count under the requested alias; a plain filter yields
    /// the matching transcripts.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidStructuredQuery` for malformed payloads
    /// and `StoreError::Mongo` on driver failures.
    pub async fn execute_structured(
        &self,
        query: &Value,
    ) -> Result<Vec<TranscriptDocument>, StoreError> {
        let parsed = parse_structured_query(query)?;
        debug!(?parsed, "store::execute_structured");

        match parsed.count_alias {
            Some(alias) => {
                let n = self.count_documents(parsed.filter).await?;
                let mut metadata = Document::new();
                metadata.insert(alias, n as i64);
                Ok(vec![TranscriptDocument::new(
                    format!("Found {n} matching documents."),
                    metadata,
                )])
            }
            None => self.find_transcripts(parsed.filter).await,
        }
    }
}
