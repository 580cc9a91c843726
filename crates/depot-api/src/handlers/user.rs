//! User handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;

use depot_entity::user::UserProfile;

use crate::dto::request::RegisterBody;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let body = RegisterBody::from_body(&body);
    let profile = state
        .users
        .register(body.email.as_deref(), body.password.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.users.profile(auth.user_id).await?))
}
