//! Core type definitions used across the MediVault workspace.

pub mod response;

pub use response::ApiErrorResponse;
