//! Medical document entities.

pub mod model;

pub use model::{CreateDocument, MedicalDocument, dedup_preserving_order};
