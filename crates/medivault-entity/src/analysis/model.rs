//! Ingestion results.

use serde::{Deserialize, Serialize};

/// A notable term in a medical document with a neutral observation about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthFinding {
    /// The term or value found, e.g. `Hemoglobin: 8 g/dL`.
    pub term: String,
    /// Informational note, never advice.
    pub observation: String,
}

/// Summary and suggested tags for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Concise summary of the key information.
    pub summary: String,
    /// Suggested category tags.
    #[serde(rename = "suggestedTags", alias = "suggested_tags", default)]
    pub suggested_tags: Vec<String>,
}

/// Outcome of running a file through the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestionReport {
    /// No usable text could be extracted; no analysis was attempted.
    NothingExtracted,
    /// Text was extracted; each analysis is absent if its call failed.
    Analyzed {
        /// The extracted text.
        extracted_text: String,
        /// Summary, when summarization succeeded.
        summary: Option<String>,
        /// Suggested tags, when summarization succeeded.
        suggested_tags: Option<Vec<String>>,
        /// Findings, when health analysis succeeded.
        health_findings: Option<Vec<HealthFinding>>,
    },
}
