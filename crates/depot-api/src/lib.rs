//! # depot-api
//!
//! HTTP API layer for Depot built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, body
//! limits, timeouts), extractors for the `X-Token` session header and HTTP
//! Basic credentials, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
