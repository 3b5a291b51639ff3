//! Retrieval orchestration for the earnings-call RAG backend.
//!
//! Public API: [`RetrievalPipeline`] for ranked context retrieval and
//! [`answer_question`] for the full question → answer path. The pipeline
//! coordinates intent detection (with a document-store short-circuit),
//! keyword tagging, self-query term extraction, query expansion, filtered
//! vector search with unfiltered fallback, de-duplication, and cosine
//! reranking against the original query.

mod answer;
mod cfg;
mod error;
mod expansion;
mod intent;
mod llm;
mod pipeline;
mod prompts;
mod query;
mod rerank;
mod self_query;
mod sources;

#[cfg(test)]
pub(crate) mod testing;

pub use answer::{QaAnswer, answer_question, build_context};
pub use cfg::RetrievalConfig;
pub use error::RetrievalError;
pub use expansion::QueryExpansion;
pub use intent::IntentDetector;
pub use llm::Completion;
pub use pipeline::RetrievalPipeline;
pub use prompts::{EXPANSION_SEPARATOR, NO_CONTEXT_RESPONSE};
pub use query::{Query, QueryIntent};
pub use rerank::Reranker;
pub use self_query::{SelfQuery, extracted_terms};
pub use sources::{DocumentQuery, IndexSearcher, StoreQuerier, VectorSearcher};
