//! Route definitions for the Depot HTTP API.

use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::ApiErrorResponse;
use crate::handlers;
use crate::state::AppState;

/// Build the router with every route. Layers are added by
/// [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(system_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(file_routes())
        .fallback(not_found)
        .with_state(state)
}

fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::health::status))
        .route("/stats", get(handlers::health::stats))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/connect", get(handlers::auth::connect))
        .route("/disconnect", get(handlers::auth::disconnect))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::register))
        .route("/users/me", get(handlers::user::me))
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::index).post(handlers::file::upload),
        )
        .route("/files/{id}", get(handlers::file::show))
        .route("/files/{id}/publish", put(handlers::file::publish))
        .route("/files/{id}/unpublish", put(handlers::file::unpublish))
        .route("/files/{id}/data", get(handlers::file::content))
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            error: format!("Cannot {method} {}", uri.path()),
        }),
    )
}
