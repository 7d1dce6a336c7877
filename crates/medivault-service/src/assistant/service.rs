//! Assistant service: search the caller's documents and stream a grounded reply.

use std::sync::Arc;

use tracing::info;

use medivault_ai::prompts::{self, ASSISTANT_SYSTEM};
use medivault_ai::{AssistantModel, TextStream};
use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_entity::document::MedicalDocument;

use crate::context::RequestContext;
use crate::sources::DataSources;

/// Most documents placed into one prompt.
pub const MAX_CONTEXT_DOCUMENTS: usize = 5;

/// Words shorter than this are ignored when the full query matches nothing.
const MIN_KEYWORD_LEN: usize = 3;

/// Answers questions about the caller's documents.
#[derive(Debug, Clone)]
pub struct AssistantService {
    sources: Arc<DataSources>,
    model: Arc<dyn AssistantModel>,
}

impl AssistantService {
    /// Creates a new assistant service.
    pub fn new(sources: Arc<DataSources>, model: Arc<dyn AssistantModel>) -> Self {
        Self { sources, model }
    }

    /// Stream an answer to `query`.
    pub async fn ask(&self, ctx: &RequestContext, query: &str) -> AppResult<TextStream> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Question must not be empty"));
        }

        let documents = self
            .sources
            .documents_for(&ctx.user_id)
            .list_by_owner(&ctx.user_id)
            .await?;
        let relevant = search(&documents, query);

        info!(
            user_id = %ctx.user_id,
            searched = documents.len(),
            matched = relevant.len(),
            "Assistant query"
        );

        let prompt = prompts::assistant_prompt(query, &relevant);
        self.model.stream_reply(ASSISTANT_SYSTEM, &prompt).await
    }
}

/// Documents matching the whole query, or failing that any of its keywords.
fn search(documents: &[MedicalDocument], query: &str) -> Vec<MedicalDocument> {
    let whole: Vec<MedicalDocument> = documents
        .iter()
        .filter(|d| d.matches_query(query))
        .take(MAX_CONTEXT_DOCUMENTS)
        .cloned()
        .collect();
    if !whole.is_empty() {
        return whole;
    }

    let keywords: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .collect();

    documents
        .iter()
        .filter(|d| keywords.iter().any(|k| d.matches_query(k)))
        .take(MAX_CONTEXT_DOCUMENTS)
        .cloned()
        .collect()
}
