//! Public resolution of share links.
//!
//! Every attempt ends in exactly one [`ShareOutcome`]. Business rejections
//! leave the link untouched; only a `Valid` outcome (or a vanished document
//! after the view was counted) consumes a view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use medivault_database::{RecordView, ShareLinkRegistry};
use medivault_entity::document::MedicalDocument;
use medivault_entity::share::{AccessCheck, AccessLogEntry, ShareLink};

use crate::sources::DataSources;

/// What the HTTP layer knows about the client.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Best-effort client address.
    pub ip_address: Option<String>,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
}

/// Closed set of resolution statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareStatus {
    /// The document is returned.
    Valid,
    /// Unknown link, or the document is gone.
    NotFound,
    /// Past `expires_at`.
    Expired,
    /// Quota used up.
    LimitReached,
    /// Infrastructure failure.
    Error,
}

impl ShareStatus {
    /// Short user-visible title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Valid => "Shared Document",
            Self::NotFound => "Not Found",
            Self::Expired => "Link Expired",
            Self::LimitReached => "Access Limit Reached",
            Self::Error => "Error",
        }
    }

    /// User-visible explanation.
    pub fn message(self) -> &'static str {
        match self {
            Self::Valid => "This document has been shared with you.",
            Self::NotFound => "This share link is invalid or the document no longer exists.",
            Self::Expired => "This share link has expired and is no longer active.",
            Self::LimitReached => "This document has been viewed the maximum number of times.",
            Self::Error => "Could not retrieve the shared document. Please try again later.",
        }
    }
}

/// Result of resolving a share link.
#[derive(Debug, Clone)]
pub enum ShareOutcome {
    /// The view was counted; carries the document and the updated link.
    Valid {
        /// The shared document.
        document: MedicalDocument,
        /// Link snapshot after the increment.
        link: ShareLink,
    },
    /// Unknown link or missing document.
    NotFound,
    /// The link has expired.
    Expired {
        /// The link as stored.
        link: ShareLink,
    },
    /// The link has no views left.
    LimitReached {
        /// The link as stored.
        link: ShareLink,
    },
    /// The registry failed.
    Error,
}

impl ShareOutcome {
    /// The status of this outcome.
    pub fn status(&self) -> ShareStatus {
        match self {
            Self::Valid { .. } => ShareStatus::Valid,
            Self::NotFound => ShareStatus::NotFound,
            Self::Expired { .. } => ShareStatus::Expired,
            Self::LimitReached { .. } => ShareStatus::LimitReached,
            Self::Error => ShareStatus::Error,
        }
    }
}

/// Validates and consumes share-link access attempts.
///
/// Holds no mutable state of its own; the registry's conditional update is
/// what keeps concurrent views within quota.
#[derive(Debug, Clone)]
pub struct AccessService {
    registry: Arc<dyn ShareLinkRegistry>,
    sources: Arc<DataSources>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(registry: Arc<dyn ShareLinkRegistry>, sources: Arc<DataSources>) -> Self {
        Self { registry, sources }
    }

    /// Resolve `link_id` on behalf of an anonymous client.
    pub async fn resolve(&self, link_id: &str, client: ClientInfo) -> ShareOutcome {
        self.resolve_at(link_id, client, Utc::now()).await
    }

    /// Resolve `link_id` as of `now`.
    pub async fn resolve_at(
        &self,
        link_id: &str,
        client: ClientInfo,
        now: DateTime<Utc>,
    ) -> ShareOutcome {
        let Ok(id) = Uuid::parse_str(link_id.trim()) else {
            debug!(link_id, "Share link id is not a valid identifier");
            return ShareOutcome::NotFound;
        };

        let link = match self.registry.find_by_id(id).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!(link_id = %id, "Share link not found");
                return ShareOutcome::NotFound;
            }
            Err(e) => {
                error!(link_id = %id, error = %e, "Failed to fetch share link");
                return ShareOutcome::Error;
            }
        };

        if let Some(rejected) = Self::reject(link, now) {
            return rejected;
        }

        let entry = AccessLogEntry::new(now, client.ip_address, client.user_agent);
        let link = match self.registry.record_view(id, entry).await {
            Ok(RecordView::Recorded(link)) => link,
            Ok(RecordView::Rejected) => return self.reclassify(id, now).await,
            Err(e) => {
                error!(link_id = %id, error = %e, "Failed to record share view");
                return ShareOutcome::Error;
            }
        };

        let source = self.sources.documents_for(&link.owner_id);
        match source.find_by_id(link.document_id).await {
            Ok(Some(document)) if document.user_id == link.owner_id => {
                info!(
                    link_id = %id,
                    document_id = %document.id,
                    view_count = link.view_count,
                    max_views = link.max_views,
                    "Shared document viewed"
                );
                ShareOutcome::Valid { document, link }
            }
            Ok(_) => {
                info!(link_id = %id, document_id = %link.document_id, "Shared document no longer available");
                ShareOutcome::NotFound
            }
            Err(e) => {
                warn!(link_id = %id, document_id = %link.document_id, error = %e, "Failed to load shared document");
                ShareOutcome::NotFound
            }
        }
    }

    /// Expiry first, then quota.
    fn reject(link: ShareLink, now: DateTime<Utc>) -> Option<ShareOutcome> {
        match link.check_access(now) {
            AccessCheck::Open => None,
            AccessCheck::Expired => {
                info!(link_id = %link.id, expires_at = %link.expires_at, "Share link expired");
                Some(ShareOutcome::Expired { link })
            }
            AccessCheck::LimitReached => {
                info!(link_id = %link.id, view_count = link.view_count, "Share link view limit reached");
                Some(ShareOutcome::LimitReached { link })
            }
        }
    }

    /// The conditional update was refused: a concurrent view took the last
    /// slot, or the link changed underneath us. Classify the fresh state.
    async fn reclassify(&self, id: Uuid, now: DateTime<Utc>) -> ShareOutcome {
        match self.registry.find_by_id(id).await {
            Ok(Some(link)) => Self::reject(link, now).unwrap_or_else(|| {
                error!(link_id = %id, "View refused although the link is open");
                ShareOutcome::Error
            }),
            Ok(None) => ShareOutcome::NotFound,
            Err(e) => {
                error!(link_id = %id, error = %e, "Failed to re-read share link");
                ShareOutcome::Error
            }
        }
    }
}
