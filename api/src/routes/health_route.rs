//! GET /health — LLM provider health snapshot.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use llm_service::health_service::HealthStatus;

use crate::core::app_state::AppState;

/// Handler: GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HealthStatus>>, (StatusCode, String)> {
    let statuses = state
        .profiles
        .health_all()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(statuses))
}
