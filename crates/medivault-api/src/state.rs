//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use medivault_ai::{AssistantModel, DocumentAnalyzer, OcrEngine, OllamaClient};
use medivault_core::config::AppConfig;
use medivault_core::traits::StorageProvider;
use medivault_database::{DatabasePool, DocumentSource, ProfileSource, ShareLinkRegistry};
use medivault_service::{
    AccessService, AssistantService, DataSources, DocumentService, IngestionPipeline,
    ProfileService, ShareService,
};

use crate::auth::TokenVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent with the in-memory backend
    pub db_pool: Option<DatabasePool>,
    /// Object store for uploaded files
    pub storage: Arc<dyn StorageProvider>,
    /// OCR/AI backend, probed by the health endpoint
    pub ollama: Option<Arc<OllamaClient>>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub verifier: Arc<TokenVerifier>,

    // ── Services ─────────────────────────────────────────────
    /// Public share-link resolution
    pub access_service: Arc<AccessService>,
    /// Share-link creation and listing
    pub share_service: Arc<ShareService>,
    /// Document CRUD
    pub document_service: Arc<DocumentService>,
    /// OCR and analysis of uploads
    pub ingestion: Arc<IngestionPipeline>,
    /// Health profile and emergency page
    pub profile_service: Arc<ProfileService>,
    /// Document assistant
    pub assistant_service: Arc<AssistantService>,
}

/// The stores and collaborators an [`AppState`] is assembled from.
#[derive(Debug, Clone)]
pub struct StateParts {
    /// PostgreSQL pool, when the postgres backend is used
    pub db_pool: Option<DatabasePool>,
    /// Document records
    pub documents: Arc<dyn DocumentSource>,
    /// Health profiles
    pub profiles: Arc<dyn ProfileSource>,
    /// Share links and their access logs
    pub share_links: Arc<dyn ShareLinkRegistry>,
    /// Object store
    pub storage: Arc<dyn StorageProvider>,
    /// Image text recognition
    pub ocr: Arc<dyn OcrEngine>,
    /// Summaries and health findings
    pub analyzer: Arc<dyn DocumentAnalyzer>,
    /// Assistant model
    pub assistant: Arc<dyn AssistantModel>,
    /// Concrete AI client, for health probing
    pub ollama: Option<Arc<OllamaClient>>,
}

impl AppState {
    /// Wire services over the given parts.
    pub fn new(config: AppConfig, parts: StateParts) -> Self {
        let sources = Arc::new(DataSources::new(
            parts.documents,
            parts.profiles,
            config.demo.clone(),
        ));

        let access_service = Arc::new(AccessService::new(
            Arc::clone(&parts.share_links),
            Arc::clone(&sources),
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&parts.share_links),
            config.share.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&sources),
            Arc::clone(&parts.storage),
            config.storage.clone(),
        ));
        let ingestion = Arc::new(IngestionPipeline::new(
            parts.ocr,
            parts.analyzer,
            config.ingestion.min_text_length,
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&sources),
            config.share.clone(),
        ));
        let assistant_service = Arc::new(AssistantService::new(sources, parts.assistant));

        Self {
            verifier: Arc::new(TokenVerifier::new(&config.auth)),
            config: Arc::new(config),
            db_pool: parts.db_pool,
            storage: parts.storage,
            ollama: parts.ollama,
            access_service,
            share_service,
            document_service,
            ingestion,
            profile_service,
            assistant_service,
        }
    }
}
