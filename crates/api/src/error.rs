use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use georecord_core::error::CoreError;
use serde_json::json;

/// Non-standard status used when the client went away before completion.
///
/// Over HTTP the request token only fires once the handler future is
/// dropped (the timeout layer answers 408 itself, a disconnect gets no
/// response), so this status reaches callers that drive the services with
/// their own token and render the error through [`AppError`].
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `georecord_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The (status, code) pair for a domain error.
///
/// The pair is unique per kind; the status alone is not. `Forbidden` and
/// `AdminRequired` both answer 403 and differ only in `code`.
pub fn classify(err: &CoreError) -> (StatusCode, &'static str) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::AlreadyExists { .. } => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        CoreError::CategoryNotFound(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CATEGORY_NOT_FOUND"),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        CoreError::AdminRequired(_) => (StatusCode::FORBIDDEN, "ADMIN_REQUIRED"),
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        CoreError::Cancelled => (
            StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::REQUEST_TIMEOUT),
            "CANCELLED",
        ),
        CoreError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Core(core) => {
                let (status, code) = classify(core);
                (status, code, core.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
