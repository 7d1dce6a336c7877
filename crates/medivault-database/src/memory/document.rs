//! In-memory document store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use medivault_core::result::AppResult;
use medivault_entity::document::{CreateDocument, MedicalDocument};

use crate::traits::DocumentSource;

/// Document store held in a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<Uuid, MedicalDocument>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document as-is, replacing any document with the same id.
    pub fn insert(&self, document: MedicalDocument) {
        self.documents.insert(document.id, document);
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalDocument>> {
        Ok(self.documents.get(&id).map(|d| d.value().clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<MedicalDocument>> {
        let mut docs: Vec<MedicalDocument> = self
            .documents
            .iter()
            .filter(|d| d.user_id == owner_id)
            .map(|d| d.value().clone())
            .collect();
        docs.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(docs)
    }

    async fn create(&self, data: CreateDocument) -> AppResult<MedicalDocument> {
        let document = data.into_document(Uuid::new_v4(), Utc::now());
        self.documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.documents.remove(&id).is_some())
    }
}
