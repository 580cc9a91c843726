//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use depot_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Client-facing message.
    pub error: String,
}

/// An [`AppError`] on its way out of a handler.
///
/// The wire message depends on the kind only. Internal detail stays in
/// the logs so that, for example, a node owned by someone else reads
/// exactly like a node that does not exist.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self.0.kind {
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            ErrorKind::Validation(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            ErrorKind::ParentNotFound => (StatusCode::BAD_REQUEST, "Parent not found".into()),
            ErrorKind::ParentNotFolder => {
                (StatusCode::BAD_REQUEST, "Parent is not a folder".into())
            }
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Not found".into()),
            ErrorKind::NotAFile => (
                StatusCode::BAD_REQUEST,
                "A folder doesn't have content".into(),
            ),
            ErrorKind::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".into(),
            ),
            ErrorKind::Storage
            | ErrorKind::Database
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0, "Request failed");
        } else {
            tracing::debug!(kind = %self.0.kind, error = %self.0.message, "Request rejected");
        }
        (status, Json(ApiErrorResponse { error })).into_response()
    }
}
