use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pixwall_core::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pixwall-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::PathTraversalDenied(_) => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "Access denied".to_string(),
                ),
                CoreError::NotFound(name) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Media not found: {name}"),
                ),
                // Browsing handlers degrade an unavailable root to an empty
                // catalog before this point; reaching here means a direct
                // file request raced the root going away.
                CoreError::RootUnavailable { .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Media not found".to_string(),
                ),
                CoreError::CorruptRecord { .. } | CoreError::Io(_) => {
                    tracing::error!(error = %core, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
