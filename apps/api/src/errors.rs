use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::graph::GraphError;
use crate::llm_client::LlmError;

/// Application-level error type.
///
/// Every variant renders as HTTP 200 with an `{"error": "..."}` body: callers
/// distinguish failure by the presence of the `error` key, never by status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Graph database error: {0}")]
    Graph(#[from] GraphError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("{0}")]
    DataAbsent(String),

    #[error("Query translation error: {0}")]
    Translation(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Graph(e) => tracing::error!("Graph error: {e}"),
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Embedding(e) => tracing::error!("Embedding error: {e}"),
            AppError::Translation(msg) => tracing::warn!("Translation error: {msg}"),
            AppError::DataAbsent(msg) => tracing::debug!("Data absent: {msg}"),
            AppError::BadRequest(msg) => tracing::warn!("Rejected request: {msg}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (StatusCode::OK, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_errors_render_as_ok_with_error_body() {
        let response =
            AppError::DataAbsent("Job 'Astronaut' not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Job 'Astronaut' not found");
    }

    #[tokio::test]
    async fn test_bad_request_renders_as_ok_with_error_body() {
        let response = AppError::BadRequest("missing field `job_title`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid request: missing field `job_title`");
    }

    #[test]
    fn test_llm_error_message_is_prefixed() {
        let err = AppError::from(LlmError::EmptyContent);
        assert_eq!(err.to_string(), "LLM error: LLM returned empty content");
    }
}
