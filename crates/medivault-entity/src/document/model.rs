//! Medical document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A medical document uploaded by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MedicalDocument {
    /// Unique document identifier.
    pub id: Uuid,
    /// Owner of the document.
    pub user_id: String,
    /// Original file name, including extension.
    pub file_name: String,
    /// Category tags, without duplicates.
    pub tags: Vec<String>,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// AI or user supplied summary.
    pub summary: Option<String>,
    /// Text extracted from the file.
    pub file_content: Option<String>,
    /// Path within the object store.
    pub file_path: Option<String>,
    /// Stored size in bytes.
    pub file_size: Option<i64>,
    /// Media type of the stored file.
    pub file_type: Option<String>,
}

impl MedicalDocument {
    /// Case-insensitive keyword match over file name, tags and summary.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        self.file_name.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
            || self
                .summary
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&query))
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Owner of the document.
    pub user_id: String,
    /// File name.
    pub file_name: String,
    /// Tags, de-duplicated.
    pub tags: Vec<String>,
    /// Summary.
    pub summary: Option<String>,
    /// Extracted text.
    pub file_content: Option<String>,
    /// Object-store path, when a file was stored.
    pub file_path: Option<String>,
    /// Stored size in bytes.
    pub file_size: Option<i64>,
    /// Media type.
    pub file_type: Option<String>,
}

impl CreateDocument {
    /// Materialize the record with an assigned id and upload time.
    pub fn into_document(self, id: Uuid, uploaded_at: DateTime<Utc>) -> MedicalDocument {
        MedicalDocument {
            id,
            user_id: self.user_id,
            file_name: self.file_name,
            tags: self.tags,
            uploaded_at,
            summary: self.summary,
            file_content: self.file_content,
            file_path: self.file_path,
            file_size: self.file_size,
            file_type: self.file_type,
        }
    }
}

/// Trim entries, drop blanks and keep the first occurrence of each value.
pub fn dedup_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.as_ref().trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
