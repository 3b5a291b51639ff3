use serde::{Deserialize, Serialize};

/// Request body for `POST /rag`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user question.
    pub query: String,
}

/// Success response body for `POST /rag`.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The generated answer.
    pub answer: String,
}

/// Error response body (500).
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}
