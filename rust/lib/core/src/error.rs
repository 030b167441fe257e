use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these,
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from
/// `{"code": "UNAUTHORIZED", "error": "...", "message": "..."}`.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const AUTH_FAILED: &str = "AUTH_FAILED";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. The JSON response carries the message twice: under
/// `message`, and under `error` which is the key the web front end reads.
///
/// ```json
/// {"code": "UNAUTHORIZED", "error": "missing session token", "message": "missing session token"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Missing or structurally invalid session token. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Login credentials did not match. HTTP 401.
    #[error("{0}")]
    AuthFailed(String),

    /// Malformed input payload. HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// Storage backend failed or timed out. HTTP 503.
    #[error("{0}")]
    StorageUnavailable(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Unauthorized(_) => error_code::UNAUTHORIZED,
            ServiceError::AuthFailed(_) => error_code::AUTH_FAILED,
            ServiceError::BadRequest(_) => error_code::BAD_REQUEST,
            ServiceError::StorageUnavailable(_) => error_code::STORAGE_UNAVAILABLE,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let body = serde_json::json!({
            "code": self.error_code(),
            "error": message,
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}
