//! Shared LLM service for the earnings-call RAG backend.
//!
//! Two logical profiles are exposed through [`service_profiles::LlmServiceProfiles`]:
//! - **completion** — text generation (query expansion, intent detection,
//!   self-query extraction, answer generation)
//! - **embedding**  — dense vector embeddings (indexing, search, reranking)
//!
//! Providers: OpenAI (default) and local Ollama. Both are thin non-streaming
//! HTTP clients; errors are normalized in [`error_handler`].

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
