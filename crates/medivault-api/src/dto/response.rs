//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medivault_entity::analysis::IngestionReport;
use medivault_entity::document::MedicalDocument;
use medivault_entity::share::{ShareLink, ViewsRemaining};
use medivault_service::{ShareOutcome, ShareStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected`, `unavailable` or `memory`.
    pub database: String,
    /// `available` or `unavailable`.
    pub storage: String,
    /// `available`, `unavailable` or `disabled`.
    pub ai: String,
}

/// A document as seen through a share link: no storage internals.
#[derive(Debug, Clone, Serialize)]
pub struct SharedDocument {
    /// Document id.
    pub id: Uuid,
    /// File name.
    pub file_name: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
    /// Summary.
    pub summary: Option<String>,
    /// Extracted text.
    pub file_content: Option<String>,
    /// Media type.
    pub file_type: Option<String>,
}

impl From<MedicalDocument> for SharedDocument {
    fn from(doc: MedicalDocument) -> Self {
        Self {
            id: doc.id,
            file_name: doc.file_name,
            tags: doc.tags,
            uploaded_at: doc.uploaded_at,
            summary: doc.summary,
            file_content: doc.file_content,
            file_type: doc.file_type,
        }
    }
}

/// Quota and expiry of a resolved link, without owner or log details.
#[derive(Debug, Clone, Serialize)]
pub struct SharedLinkInfo {
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Successful views so far.
    pub view_count: i32,
    /// Views left, or `∞`.
    pub views_remaining: ViewsRemaining,
}

impl From<&ShareLink> for SharedLinkInfo {
    fn from(link: &ShareLink) -> Self {
        Self {
            expires_at: link.expires_at,
            view_count: link.view_count,
            views_remaining: link.views_remaining(),
        }
    }
}

/// Body of `GET /share/{id}` for every outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ShareAccessResponse {
    /// Outcome status.
    pub status: ShareStatus,
    /// Short title for the page.
    pub title: &'static str,
    /// User-visible explanation.
    pub message: &'static str,
    /// The document, only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<SharedDocument>,
    /// Link state, when the link exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<SharedLinkInfo>,
}

impl From<ShareOutcome> for ShareAccessResponse {
    fn from(outcome: ShareOutcome) -> Self {
        let status = outcome.status();
        let (document, link) = match outcome {
            ShareOutcome::Valid { document, link } => {
                (Some(document.into()), Some(SharedLinkInfo::from(&link)))
            }
            ShareOutcome::Expired { link } | ShareOutcome::LimitReached { link } => {
                (None, Some(SharedLinkInfo::from(&link)))
            }
            ShareOutcome::NotFound | ShareOutcome::Error => (None, None),
        };
        Self {
            status,
            title: status.title(),
            message: status.message(),
            document,
            link,
        }
    }
}

/// One line of the `POST /api/documents/analyze` NDJSON stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyzeEvent {
    /// OCR progress in `[0, 1]`.
    Progress {
        /// Fraction done.
        progress: f32,
    },
    /// Final pipeline result.
    Result {
        /// The report.
        report: IngestionReport,
    },
    /// The pipeline failed.
    Error {
        /// Machine-readable code.
        error: String,
        /// Human-readable message.
        message: String,
    },
}
