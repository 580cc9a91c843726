//! HTTP Basic credentials for `GET /connect`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};

use depot_core::error::AppError;

use crate::error::ApiError;

/// Email and password from an `Authorization: Basic` header.
///
/// A missing or undecodable header is `Unauthorized`.
#[derive(Clone)]
pub struct BasicCredentials {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BasicCredentials {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .typed_get::<Authorization<Basic>>()
            .ok_or_else(|| AppError::unauthorized("Missing or malformed Basic credentials"))?;
        Ok(Self {
            email: header.username().to_string(),
            password: header.password().to_string(),
        })
    }
}
