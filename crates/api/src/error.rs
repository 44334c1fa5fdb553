use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wirekit_core::error::CoreError;
use wirekit_core::persistence::PersistenceError;
use wirekit_export::ExportError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wirekit_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The static export could not be packaged.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Persistence(err) => classify_persistence_error(err),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Export errors ---
            AppError::Export(err) => {
                tracing::error!(error = %err, "Export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The export archive could not be created".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a persistence error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - A failing remote backend maps to 502.
/// - Everything else maps to 500 with a sanitized message.
fn classify_persistence_error(err: &PersistenceError) -> (StatusCode, &'static str, String) {
    match err {
        PersistenceError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        PersistenceError::Remote { status, .. } => {
            tracing::error!(error = %err, "Remote persistence error");
            (
                StatusCode::BAD_GATEWAY,
                "PERSISTENCE_ERROR",
                format!("Remote store responded with status {status}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Persistence error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                "The change could not be saved".to_string(),
            )
        }
    }
}
