//! Turns an uploaded file into extracted text plus AI analysis.

pub mod pipeline;

pub use pipeline::{IngestionPipeline, MediaKind, PDF_PLACEHOLDER};
