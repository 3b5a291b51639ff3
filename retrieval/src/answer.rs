//! Context composition and answer generation.

use tracing::{debug, info};
use vector_store::SearchResult;

use crate::error::RetrievalError;
use crate::llm::Completion;
use crate::pipeline::RetrievalPipeline;
use crate::prompts::{NO_CONTEXT_RESPONSE, answer_prompt};

/// Final answer together with the context that produced it.
#[derive(Clone, Debug)]
pub struct QaAnswer {
    /// Model-generated answer (or the fixed no-context response).
    pub answer: String,
    /// Context chunks fed into answer generation.
    pub context: Vec<SearchResult>,
}

/// Joins retrieved texts into numbered `[Section i]` blocks.
///
/// Empty input produces an empty string.
pub fn build_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[Section {}]\n{}\n", i + 1, r.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs retrieval and generates an answer from the composed context.
///
/// An empty context short-circuits to the fixed no-information response
/// without calling the generative service; completion failures propagate to
/// the API layer.
///
/// # Errors
/// Returns service errors from the answer-generation call only.
pub async fn answer_question(
    pipeline: &RetrievalPipeline,
    completion: &dyn Completion,
    question: &str,
) -> Result<QaAnswer, RetrievalError> {
    let context_chunks = pipeline.retrieve(question).await;
    let context = build_context(&context_chunks);

    if context.is_empty() {
        info!("no context retrieved; returning fixed response");
        return Ok(QaAnswer {
            answer: NO_CONTEXT_RESPONSE.to_string(),
            context: context_chunks,
        });
    }

    debug!(sections = context_chunks.len(), "generating answer");
    let answer = completion
        .complete(&answer_prompt(question, &context))
        .await?;

    Ok(QaAnswer {
        answer,
        context: context_chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::result;

    #[test]
    fn sections_are_numbered_from_one() {
        let ctx = build_context(&[
            result("Revenue grew.", Some(0.9)),
            result("Margins expanded.", Some(0.8)),
        ]);
        assert!(ctx.starts_with("[Section 1]\nRevenue grew."));
        assert!(ctx.contains("[Section 2]\nMargins expanded."));
    }

    #[test]
    fn empty_results_produce_empty_context() {
        assert_eq!(build_context(&[]), "");
    }
}
