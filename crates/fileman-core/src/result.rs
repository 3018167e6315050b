//! Convenience result type alias for fileman.

use crate::error::AppError;

/// A specialized `Result` type for fileman operations.
pub type AppResult<T> = Result<T, AppError>;
