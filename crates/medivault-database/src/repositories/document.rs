//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use medivault_core::error::{AppError, ErrorKind};
use medivault_core::result::AppResult;
use medivault_entity::document::{CreateDocument, MedicalDocument};

use crate::traits::DocumentSource;

/// PostgreSQL-backed document store.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentSource for DocumentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalDocument>> {
        sqlx::query_as::<_, MedicalDocument>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<MedicalDocument>> {
        sqlx::query_as::<_, MedicalDocument>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn create(&self, data: CreateDocument) -> AppResult<MedicalDocument> {
        sqlx::query_as::<_, MedicalDocument>(
            "INSERT INTO documents (id, user_id, file_name, tags, summary, file_content, file_path, file_size, file_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.user_id)
        .bind(&data.file_name)
        .bind(&data.tags)
        .bind(&data.summary)
        .bind(&data.file_content)
        .bind(&data.file_path)
        .bind(data.file_size)
        .bind(&data.file_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
