//! Error types for lappi-dispatch
//!
//! Maps dispatch-core error kinds to HTTP status codes and the JSON error
//! envelope `{"error": {"code": .., "message": ..}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lappi_common::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed HTTP request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Error surfaced by the dispatch core or a handler
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// Status code and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Core(err) => match err {
                CoreError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
                CoreError::UnknownHandler(_) => (StatusCode::NOT_FOUND, "UNKNOWN_HANDLER"),
                CoreError::UnknownSource(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_SOURCE"),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                CoreError::Config(_) => (StatusCode::PRECONDITION_FAILED, "CONFIGURATION_ERROR"),
                CoreError::Lookup(_) => (StatusCode::NOT_FOUND, "LOOKUP_FAILED"),
                CoreError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
                CoreError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
