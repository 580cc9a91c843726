//! HTTP handlers grouped by resource.

pub mod auth;
pub mod file;
pub mod health;
pub mod user;
