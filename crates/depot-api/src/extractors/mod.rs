//! Custom Axum extractors.

pub mod auth;
pub mod basic;

pub use auth::{AuthUser, OptionalUser, XToken};
pub use basic::BasicCredentials;
