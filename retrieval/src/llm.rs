//! Completion seam over the generative text service.

use std::{future::Future, pin::Pin};

use llm_service::service_profiles::LlmServiceProfiles;

use crate::error::RetrievalError;

/// Synchronous-style text completion interface used by the pipeline steps.
///
/// The shared [`LlmServiceProfiles`] implements this; tests plug in mocks.
pub trait Completion: Send + Sync {
    /// Completes `prompt` and returns the raw response text.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>>;
}

impl Completion for LlmServiceProfiles {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            let out = LlmServiceProfiles::complete(self, prompt, None).await?;
            Ok(out)
        })
    }
}
