//! Document service: owner CRUD over medical documents.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use medivault_core::config::StorageConfig;
use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_core::traits::storage::StorageProvider;
use medivault_entity::document::{CreateDocument, MedicalDocument, dedup_preserving_order};
use medivault_storage::{document_key, mime_from_path};

use crate::context::RequestContext;
use crate::sources::DataSources;

/// Raw file attached to a save.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Media type sent by the client.
    pub media_type: Option<String>,
    /// File bytes.
    pub data: Bytes,
}

/// Fields of a document save.
#[derive(Debug, Clone, Default)]
pub struct SaveDocumentParams {
    /// File name, including extension.
    pub file_name: String,
    /// Tags as entered; blanks and duplicates are dropped.
    pub tags: Vec<String>,
    /// Summary.
    pub summary: Option<String>,
    /// Text extracted during ingestion.
    pub extracted_text: Option<String>,
    /// Optional original file.
    pub file: Option<UploadedFile>,
}

/// Document CRUD scoped to the caller.
#[derive(Debug, Clone)]
pub struct DocumentService {
    sources: Arc<DataSources>,
    storage: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        sources: Arc<DataSources>,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            sources,
            storage,
            config,
        }
    }

    /// The caller's documents, newest first.
    pub async fn list_documents(&self, ctx: &RequestContext) -> AppResult<Vec<MedicalDocument>> {
        self.sources
            .documents_for(&ctx.user_id)
            .list_by_owner(&ctx.user_id)
            .await
    }

    /// One of the caller's documents.
    pub async fn get_document(&self, ctx: &RequestContext, id: Uuid) -> AppResult<MedicalDocument> {
        let document = self
            .sources
            .documents_for(&ctx.user_id)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        if !ctx.owns(&document.user_id) {
            return Err(AppError::authorization(
                "You do not have access to this document",
            ));
        }

        Ok(document)
    }

    /// Store the optional file, then write the record.
    pub async fn save_document(
        &self,
        ctx: &RequestContext,
        params: SaveDocumentParams,
    ) -> AppResult<MedicalDocument> {
        let file_name = params.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }

        let tags = dedup_preserving_order(&params.tags);
        let demo = self.sources.is_demo(&ctx.user_id);

        let (file_path, file_size, file_type) = match params.file {
            Some(file) => {
                if file.data.len() as u64 > self.config.max_upload_size_bytes {
                    return Err(AppError::validation(format!(
                        "File exceeds maximum upload size of {} bytes",
                        self.config.max_upload_size_bytes
                    )));
                }

                let file_type = file
                    .media_type
                    .filter(|m| !m.trim().is_empty())
                    .or_else(|| mime_from_path(&file_name).map(str::to_string));
                let size = file.data.len() as i64;

                if demo {
                    (None, Some(size), file_type)
                } else {
                    let key = document_key(&ctx.user_id, Uuid::new_v4(), &file_name);
                    self.storage.write(&key, file.data).await?;
                    (Some(key), Some(size), file_type)
                }
            }
            None => (None, None, mime_from_path(&file_name).map(str::to_string)),
        };

        let document = self
            .sources
            .documents_for(&ctx.user_id)
            .create(CreateDocument {
                user_id: ctx.user_id.clone(),
                file_name,
                tags,
                summary: params.summary.filter(|s| !s.trim().is_empty()),
                file_content: params.extracted_text,
                file_path,
                file_size,
                file_type,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            file_name = %document.file_name,
            stored = document.file_path.is_some(),
            "Document saved"
        );

        Ok(document)
    }

    /// Delete the stored file (best effort) and the record.
    pub async fn delete_document(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let document = self.get_document(ctx, id).await?;

        if let Some(path) = document.file_path.as_deref() {
            if let Err(e) = self.storage.delete(path).await {
                warn!(document_id = %id, path, error = %e, "Failed to delete stored file");
            }
        }

        let deleted = self
            .sources
            .documents_for(&ctx.user_id)
            .delete(id)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Document not found"));
        }

        info!(user_id = %ctx.user_id, document_id = %id, "Document deleted");
        Ok(())
    }
}
