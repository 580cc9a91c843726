//! Convenience result type alias for Depot.

use crate::error::AppError;

/// A specialized `Result` type for Depot operations.
pub type AppResult<T> = Result<T, AppError>;
