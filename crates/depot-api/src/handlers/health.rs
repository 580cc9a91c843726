//! Status and stats handlers.

use axum::Json;
use axum::extract::State;

use depot_service::{StatsReport, StatusReport};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /status
pub async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.system.status().await)
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsReport>, ApiError> {
    Ok(Json(state.system.stats().await?))
}
