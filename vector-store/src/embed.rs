//! Embedding provider seam used by ingestion, search and reranking.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use llm_service::service_profiles::LlmServiceProfiles;

use crate::errors::VectorStoreError;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in your own embedding backend; the default
/// implementation delegates to the shared LLM service profiles.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds a single text.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, VectorStoreError>> + Send + 'a>>;

    /// Embeds a whole batch in one provider call.
    ///
    /// The output is parallel to `texts`; an empty batch must resolve to an
    /// empty vector without touching the backend.
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, VectorStoreError>> + Send + 'a>>;
}

/// Embedder backed by the shared [`LlmServiceProfiles`] embedding profile.
#[derive(Clone)]
pub struct ProfilesEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension, when known.
    dim: Option<usize>,
}

impl ProfilesEmbedder {
    /// Constructs a new embedder; `dim` enables strict dimension checks.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }

    fn check_dim(&self, vector: &[f32]) -> Result<(), VectorStoreError> {
        if let Some(want) = self.dim {
            if vector.len() != want {
                return Err(VectorStoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want,
                });
            }
        }
        Ok(())
    }
}

impl EmbeddingsProvider for ProfilesEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, VectorStoreError>> + Send + 'a>> {
        Box::pin(async move {
            let vector = self.svc.embed(text).await?;
            self.check_dim(&vector)?;
            Ok(vector)
        })
    }

    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, VectorStoreError>> + Send + 'a>> {
        Box::pin(async move {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let vectors = self.svc.embed_batch(texts).await?;
            for v in &vectors {
                self.check_dim(v)?;
            }
            Ok(vectors)
        })
    }
}
