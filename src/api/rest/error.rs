//! Error handling for REST API
//!
//! Provides the `ApiError` type used across all REST endpoints.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Failure taxonomy of the mock API.
///
/// The wire shape follows the contract of the original service: 400/401/403
/// render as `{"status": message}` (the file and auth routes), 404 renders
/// as `{"error": message}` (the storage route).
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => status_body(StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => status_body(StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => status_body(StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => {
                let body = serde_json::json!({ "error": msg });
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal(details) => {
                tracing::error!(%details, "internal server error");
                status_body(StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

fn status_body(status: StatusCode, message: String) -> axum::response::Response {
    let body = serde_json::json!({ "status": message });
    (status, Json(body)).into_response()
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
