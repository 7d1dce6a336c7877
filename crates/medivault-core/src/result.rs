//! Convenience result type alias for MediVault.

use crate::error::AppError;

/// A specialized `Result` type for MediVault operations.
pub type AppResult<T> = Result<T, AppError>;
