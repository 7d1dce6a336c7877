//! Share link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::policy::{AccessCheck, ShareDuration, ViewLimit, ViewsRemaining};

/// A single successful access through a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccessLogEntry {
    /// Server time of the access.
    pub accessed_at: DateTime<Utc>,
    /// Best-effort client address, `"unknown"` when unavailable.
    pub ip_address: String,
    /// Client-supplied user agent, `"unknown"` when absent.
    pub user_agent: String,
}

impl AccessLogEntry {
    /// Placeholder for a missing address or user agent.
    pub const UNKNOWN: &'static str = "unknown";

    /// Build an entry, substituting the placeholder for blank values.
    pub fn new(
        accessed_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        fn or_unknown(value: Option<String>) -> String {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| AccessLogEntry::UNKNOWN.to_string())
        }

        Self {
            accessed_at,
            ip_address: or_unknown(ip_address),
            user_agent: or_unknown(user_agent),
        }
    }
}

/// A time-limited, view-limited share of one document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique link identifier.
    pub id: Uuid,
    /// User who created the link.
    pub owner_id: String,
    /// The shared document.
    pub document_id: Uuid,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link stops working.
    pub expires_at: DateTime<Utc>,
    /// View quota, `0` for unlimited.
    pub max_views: i32,
    /// Successful views so far.
    pub view_count: i32,
    /// Append-only access history, oldest first.
    #[sqlx(skip)]
    #[serde(default)]
    pub access_logs: Vec<AccessLogEntry>,
}

impl ShareLink {
    /// Check whether the link has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check whether the view quota is used up.
    pub fn is_exhausted(&self) -> bool {
        self.max_views > 0 && self.view_count >= self.max_views
    }

    /// Classify the link at `now`. Expiry wins over exhaustion.
    pub fn check_access(&self, now: DateTime<Utc>) -> AccessCheck {
        if self.is_expired(now) {
            AccessCheck::Expired
        } else if self.is_exhausted() {
            AccessCheck::LimitReached
        } else {
            AccessCheck::Open
        }
    }

    /// Views left for display purposes.
    pub fn views_remaining(&self) -> ViewsRemaining {
        if self.max_views == 0 {
            ViewsRemaining::Unlimited
        } else {
            ViewsRemaining::Limited(self.max_views.saturating_sub(self.view_count).max(0) as u32)
        }
    }
}

/// Data required to create a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// Owner of the link.
    pub owner_id: String,
    /// Document being shared.
    pub document_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// View quota, `0` for unlimited.
    pub max_views: i32,
}

impl CreateShareLink {
    /// Derive expiry and quota from the chosen policy.
    pub fn new(
        owner_id: impl Into<String>,
        document_id: Uuid,
        duration: ShareDuration,
        limit: ViewLimit,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            document_id,
            created_at: now,
            expires_at: now + duration.as_delta(),
            max_views: limit.max_views(),
        }
    }

    /// Materialize the record with an assigned id and no views yet.
    pub fn into_link(self, id: Uuid) -> ShareLink {
        ShareLink {
            id,
            owner_id: self.owner_id,
            document_id: self.document_id,
            created_at: self.created_at,
            expires_at: self.expires_at,
            max_views: self.max_views,
            view_count: 0,
            access_logs: Vec::new(),
        }
    }
}
