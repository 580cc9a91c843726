//! # depot-core
//!
//! Core crate for Depot. Contains the unified error system, configuration
//! schemas, typed identifiers, the root-sentinel parent reference, fixed
//! pagination, and the traits implemented by the backing-store crates.
//!
//! This crate has **no** internal dependencies on other Depot crates.

pub mod config;
pub mod error;
pub mod result;
pub mod timeout;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind, ValidationReason};
pub use result::AppResult;
