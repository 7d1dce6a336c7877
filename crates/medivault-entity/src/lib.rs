//! # medivault-entity
//!
//! Domain entity models for MediVault. Structs that map to a database
//! table derive `sqlx::FromRow`; the rest are value objects passed between
//! the service layer and its collaborators.

pub mod analysis;
pub mod document;
pub mod profile;
pub mod share;
