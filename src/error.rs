// API error taxonomy. Internal detail is logged, never serialized.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing/invalid token or ownership mismatch -> 401.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Missing record or malformed identifier -> 404.
    #[error("{0}")]
    NotFound(&'static str),

    /// Duplicate registration, bad credentials, invalid field values -> 400.
    #[error("{0}")]
    Validation(String),

    /// Store failures, measurement collection failures -> 500 with a
    /// generic body; the cause stays server-side.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "msg": msg }))).into_response()
    }
}
