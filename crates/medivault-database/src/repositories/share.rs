//! Share link repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use medivault_core::error::{AppError, ErrorKind};
use medivault_core::result::AppResult;
use medivault_entity::share::{AccessLogEntry, CreateShareLink, ShareLink};

use crate::traits::{RecordView, ShareLinkRegistry};

/// Access log row with its owning link.
#[derive(sqlx::FromRow)]
struct AccessLogRow {
    share_link_id: Uuid,
    #[sqlx(flatten)]
    entry: AccessLogEntry,
}

/// PostgreSQL-backed share link registry.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_logs(&self, link_ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<AccessLogEntry>>> {
        let rows = sqlx::query_as::<_, AccessLogRow>(
            "SELECT share_link_id, accessed_at, ip_address, user_agent
             FROM share_access_logs WHERE share_link_id = ANY($1) ORDER BY id ASC",
        )
        .bind(link_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load access logs", e))?;

        let mut logs: HashMap<Uuid, Vec<AccessLogEntry>> = HashMap::new();
        for row in rows {
            logs.entry(row.share_link_id).or_default().push(row.entry);
        }
        Ok(logs)
    }
}

#[async_trait]
impl ShareLinkRegistry for ShareLinkRepository {
    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (id, owner_id, document_id, created_at, expires_at, max_views, view_count)
             VALUES ($1, $2, $3, $4, $5, $6, 0) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.owner_id)
        .bind(data.document_id)
        .bind(data.created_at)
        .bind(data.expires_at)
        .bind(data.max_views)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share link", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>> {
        let link = sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share link", e)
            })?;

        match link {
            Some(mut link) => {
                link.access_logs = self.load_logs(&[id]).await?.remove(&id).unwrap_or_default();
                Ok(Some(link))
            }
            None => Ok(None),
        }
    }

    async fn record_view(&self, id: Uuid, entry: AccessLogEntry) -> AppResult<RecordView> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, ShareLink>(
            "UPDATE share_links SET view_count = view_count + 1
             WHERE id = $1 AND expires_at > $2 AND (max_views = 0 OR view_count < max_views)
             RETURNING *",
        )
        .bind(id)
        .bind(entry.accessed_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count share view", e))?;

        let Some(mut link) = updated else {
            // Nothing written; dropping the transaction rolls it back.
            return Ok(RecordView::Rejected);
        };

        sqlx::query(
            "INSERT INTO share_access_logs (share_link_id, accessed_at, ip_address, user_agent)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(entry.accessed_at)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to log share access", e))?;

        let logs = sqlx::query_as::<_, AccessLogEntry>(
            "SELECT accessed_at, ip_address, user_agent
             FROM share_access_logs WHERE share_link_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load access logs", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit share view", e)
        })?;

        link.access_logs = logs;
        Ok(RecordView::Recorded(link))
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<ShareLink>> {
        let mut links = sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))?;

        if links.is_empty() {
            return Ok(links);
        }

        let ids: Vec<Uuid> = links.iter().map(|l| l.id).collect();
        let mut logs = self.load_logs(&ids).await?;
        for link in &mut links {
            link.access_logs = logs.remove(&link.id).unwrap_or_default();
        }
        Ok(links)
    }
}
