//! In-memory share link registry.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use medivault_core::result::AppResult;
use medivault_entity::share::{AccessCheck, AccessLogEntry, CreateShareLink, ShareLink};

use crate::traits::{RecordView, ShareLinkRegistry};

/// Share link registry held in a concurrent map.
///
/// `record_view` runs its check and update under the entry's shard lock, so
/// concurrent views of the same link serialize.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareLinkRegistry {
    links: Arc<DashMap<Uuid, ShareLink>>,
}

impl MemoryShareLinkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link as-is, replacing any link with the same id.
    pub fn insert(&self, link: ShareLink) {
        self.links.insert(link.id, link);
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl ShareLinkRegistry for MemoryShareLinkRegistry {
    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink> {
        let link = data.into_link(Uuid::new_v4());
        self.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>> {
        Ok(self.links.get(&id).map(|l| l.value().clone()))
    }

    async fn record_view(&self, id: Uuid, entry: AccessLogEntry) -> AppResult<RecordView> {
        let Some(mut link) = self.links.get_mut(&id) else {
            return Ok(RecordView::Rejected);
        };

        if link.check_access(entry.accessed_at) != AccessCheck::Open {
            debug!(link_id = %id, "View refused by conditional update");
            return Ok(RecordView::Rejected);
        }

        link.view_count += 1;
        link.access_logs.push(entry);
        Ok(RecordView::Recorded(link.value().clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<ShareLink>> {
        let mut links: Vec<ShareLink> = self
            .links
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .map(|l| l.value().clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }
}
