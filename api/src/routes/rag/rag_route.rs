//! POST /rag — answers a question with RAG context.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use retrieval::{QaAnswer, answer_question};

use crate::{
    core::app_state::AppState,
    routes::rag::rag_request::{ErrorResponse, QueryRequest, QueryResponse},
};

/// Handler: POST /rag
///
/// Retrieval failures never surface here; they produce an empty context and
/// the fixed no-information answer. Only answer-generation failures map to
/// a 500 with a structured error payload.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/rag \
///   -H 'content-type: application/json' \
///   -d '{"query":"What was revenue guidance for next quarter?"}'
/// ```
pub async fn rag(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let QaAnswer { answer, .. } =
        answer_question(state.pipeline.as_ref(), state.profiles.as_ref(), &body.query)
            .await
            .map_err(|e| {
                error!(error = %e, "answer generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
            })?;

    Ok(Json(QueryResponse { answer }))
}
