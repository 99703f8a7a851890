//! Error types for the HTTP layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scorekeeper_store::StoreError;
use scorekeeper_validate::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// Errors a handler can return; each maps to exactly one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request shape was rejected before any store call.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// A resource the request depends on does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request body exceeded the size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The store reported a failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(errors = %errors, "Rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "validation failed", "details": errors })),
                )
                    .into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::PayloadTooLarge(message) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(
                    code = err.code().unwrap_or("-"),
                    error = %err,
                    "Store failure"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
