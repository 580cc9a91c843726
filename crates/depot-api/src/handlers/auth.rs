//! Auth handlers: connect and disconnect.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::{BasicCredentials, XToken};
use crate::state::AppState;

/// GET /connect
pub async fn connect(
    State(state): State<AppState>,
    creds: BasicCredentials,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.auth.connect(&creds.email, &creds.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect
pub async fn disconnect(
    State(state): State<AppState>,
    token: XToken,
) -> Result<StatusCode, ApiError> {
    state.auth.disconnect(token.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
