use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pricebook_core::error::CoreError;

use crate::response::ApiResponse;

/// Message returned for every 500, whatever the underlying cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when the request timeout elapses.
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timeout";

/// Message accompanying field-level validation failures.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation errors";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pricebook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    RequestTimeout,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::InvalidInput(fields) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::failure_with(fields, VALIDATION_ERROR_MESSAGE)),
                    )
                        .into_response();
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                // Duplicate keys are a client input problem, reported as 400.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::RequestTimeout => {
                tracing::warn!("Request timed out");
                (StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT_MESSAGE.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}
