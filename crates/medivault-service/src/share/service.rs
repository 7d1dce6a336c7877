//! Owner operations on share links.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use medivault_core::config::ShareConfig;
use medivault_core::result::AppResult;
use medivault_database::ShareLinkRegistry;
use medivault_entity::share::{CreateShareLink, ShareDuration, ViewLimit};

use super::link::ShareLinkView;
use crate::context::RequestContext;

/// Mints and lists share links for their owner.
#[derive(Debug, Clone)]
pub struct ShareService {
    registry: Arc<dyn ShareLinkRegistry>,
    config: ShareConfig,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(registry: Arc<dyn ShareLinkRegistry>, config: ShareConfig) -> Self {
        Self { registry, config }
    }

    /// Create a link to `document_id` owned by the caller.
    ///
    /// The document is not looked up here; a link to a missing or foreign
    /// document resolves as not found.
    pub async fn create_share_link(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        duration: ShareDuration,
        limit: ViewLimit,
    ) -> AppResult<ShareLinkView> {
        let data = CreateShareLink::new(
            ctx.user_id.clone(),
            document_id,
            duration,
            limit,
            Utc::now(),
        );
        let link = self.registry.create(data).await?;

        info!(
            owner_id = %ctx.user_id,
            link_id = %link.id,
            document_id = %document_id,
            expires_at = %link.expires_at,
            max_views = link.max_views,
            "Share link created"
        );

        Ok(ShareLinkView::new(link, &self.config))
    }

    /// The caller's links, newest first.
    pub async fn list_share_links(&self, ctx: &RequestContext) -> AppResult<Vec<ShareLinkView>> {
        let links = self.registry.list_by_owner(&ctx.user_id).await?;
        Ok(links
            .into_iter()
            .map(|link| ShareLinkView::new(link, &self.config))
            .collect())
    }
}
