//! Collaborator interfaces the service layer depends on.
//!
//! Every implementation maps its failures into [`AppError`] with
//! [`ErrorKind::Database`](medivault_core::error::ErrorKind::Database);
//! absence is `Ok(None)`, never an error.
//!
//! [`AppError`]: medivault_core::error::AppError

use async_trait::async_trait;
use uuid::Uuid;

use medivault_core::result::AppResult;
use medivault_entity::document::{CreateDocument, MedicalDocument};
use medivault_entity::profile::{HealthProfile, UpsertProfile};
use medivault_entity::share::{AccessLogEntry, CreateShareLink, ShareLink};

/// Result of a conditional view increment.
#[derive(Debug, Clone)]
pub enum RecordView {
    /// The view was counted and logged; carries the updated link.
    Recorded(ShareLink),
    /// The link is missing, expired, or out of views at the time of the
    /// update. Nothing was written.
    Rejected,
}

/// Persistent collection of medical documents.
#[async_trait]
pub trait DocumentSource: Send + Sync + std::fmt::Debug + 'static {
    /// Find a document by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalDocument>>;

    /// All documents of an owner, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<MedicalDocument>>;

    /// Insert a new document record.
    async fn create(&self, data: CreateDocument) -> AppResult<MedicalDocument>;

    /// Delete a document record. Returns `false` when it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistent collection of share links.
#[async_trait]
pub trait ShareLinkRegistry: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new link with a freshly assigned id and zero views.
    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink>;

    /// Find a link, including its access log.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>>;

    /// Atomically increment `view_count` and append `entry`, but only while
    /// the link is unexpired at `entry.accessed_at` and under its quota.
    async fn record_view(&self, id: Uuid, entry: AccessLogEntry) -> AppResult<RecordView>;

    /// All links created by an owner, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<ShareLink>>;
}

/// Persistent collection of health profiles, one per user.
#[async_trait]
pub trait ProfileSource: Send + Sync + std::fmt::Debug + 'static {
    /// Find the profile of a user.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<HealthProfile>>;

    /// Create or replace the profile of `data.user_id`.
    async fn upsert(&self, data: UpsertProfile) -> AppResult<HealthProfile>;
}
