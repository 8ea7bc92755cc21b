use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::error::CoreError;
use roster_core::validation::{FieldErrors, FIELD_ROLE, ROLE_TAKEN_MESSAGE};
use roster_db::repositories::staff_member_repo::is_role_conflict;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`]: form validation failures become a bare
/// field → messages map with status 422, everything else a `{ error, code }`
/// JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roster_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Rejected form input, keyed by field.
    #[error("Validation failed")]
    Validation(FieldErrors),

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
            // --- Field validation (422, raw map body) ---
            AppError::Validation(errors) => return validation_response(errors),
            // Lost the race on a single-holder role: same answer as the pre-check.
            AppError::Database(err) if is_role_conflict(err) => {
                return validation_response(&FieldErrors::single(FIELD_ROLE, ROLE_TAKEN_MESSAGE));
            }

            // --- CoreError variants ---
            AppError::Core(CoreError::Storage(msg)) => {
                tracing::error!(error = %msg, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to store or remove a file".to_string(),
                )
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn validation_response(errors: &FieldErrors) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(errors)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
