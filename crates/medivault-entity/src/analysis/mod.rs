//! Value objects produced by the ingestion pipeline.

pub mod model;

pub use model::{DocumentAnalysis, HealthFinding, IngestionReport};
