use std::error::Error;
use std::sync::Arc;

use llm_service::config::default_config::{config_completion, config_embedding};
use llm_service::service_profiles::LlmServiceProfiles;
use retrieval::{IndexSearcher, RetrievalConfig, RetrievalPipeline, StoreQuerier};
use transcript_store::{StoreConfig, TranscriptStore};
use vector_store::{ProfilesEmbedder, TranscriptIndex, VectorConfig};

/// Shared state for all HTTP handlers.
///
/// Built once at startup; every collaborator is explicitly constructed and
/// injected rather than cached in process-wide singletons.
pub struct AppState {
    /// Shared LLM profiles (completion + embedding).
    pub profiles: Arc<LlmServiceProfiles>,
    /// The wired retrieval pipeline.
    pub pipeline: Arc<RetrievalPipeline>,
}

impl AppState {
    /// Wires profiles, stores and the retrieval pipeline from environment
    /// configuration.
    pub async fn from_env() -> Result<Self, Box<dyn Error>> {
        let profiles = Arc::new(LlmServiceProfiles::new(
            config_completion()?,
            config_embedding()?,
            Some(10),
        )?);

        let vector_cfg = VectorConfig::from_env();
        let embedder = Arc::new(ProfilesEmbedder::new(
            profiles.clone(),
            vector_cfg.embedding_dim,
        ));
        let index = Arc::new(TranscriptIndex::new(vector_cfg)?);

        let store = Arc::new(TranscriptStore::connect(&StoreConfig::from_env()?).await?);

        let pipeline = Arc::new(RetrievalPipeline::new(
            RetrievalConfig::from_env(),
            profiles.clone(),
            embedder.clone(),
            Arc::new(IndexSearcher::new(index, embedder)),
            Arc::new(StoreQuerier::new(store)),
        )?);

        Ok(Self { profiles, pipeline })
    }
}
