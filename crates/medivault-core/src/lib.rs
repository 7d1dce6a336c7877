//! # medivault-core
//!
//! Core crate for MediVault. Contains configuration schemas, the object
//! storage trait, the error response body, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MediVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
