//! Session token extractors: the raw `X-Token` header, an authenticated
//! user, and an optional user for routes that also serve anonymous callers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use depot_core::types::UserId;
use depot_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// The raw session token, if the request carried one.
#[derive(Debug, Clone)]
pub struct XToken(pub Option<String>);

impl XToken {
    /// The token as a string slice.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for XToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Self(token))
    }
}

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(XToken(token)) = XToken::from_request_parts(parts, state).await;
        let user = state.access.authenticate(token.as_deref()).await?;
        Ok(AuthUser(RequestContext::new(&user)))
    }
}

/// The requesting user when the token authenticates, `None` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct OptionalUser(pub Option<UserId>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(XToken(token)) = XToken::from_request_parts(parts, state).await;
        Ok(OptionalUser(
            state.access.optional_user(token.as_deref()).await?,
        ))
    }
}
