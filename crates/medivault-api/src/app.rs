//! Application builder: wires router, middleware and state into an Axum app.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tracing::{error, info, warn};

use medivault_ai::OllamaClient;
use medivault_core::config::{AppConfig, CorsConfig, StoreBackend};
use medivault_core::error::AppError;
use medivault_core::traits::StorageProvider;
use medivault_database::DatabasePool;
use medivault_database::memory::{
    MemoryDocumentStore, MemoryProfileStore, MemoryShareLinkRegistry,
};
use medivault_database::migration::run_migrations;
use medivault_database::repositories::{
    DocumentRepository, ProfileRepository, ShareLinkRepository,
};
use medivault_storage::LocalStorageProvider;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::{AppState, StateParts};

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state).layer(build_cors_layer(cors_config))
}

/// Connect the configured stores and collaborators and assemble the state.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Step 1: Object storage ───────────────────────────────────
    info!(root = %config.storage.root_path, "Initializing local storage");
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);

    // ── Step 2: OCR / AI client ──────────────────────────────────
    let ollama = Arc::new(OllamaClient::new(&config.ingestion)?);
    if !ollama.is_available().await {
        warn!(
            url = %config.ingestion.ollama_url,
            "AI backend unreachable; ingestion and assistant will fail until it is up"
        );
    }

    // ── Step 3: Record stores ────────────────────────────────────
    let parts = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.auto_migrate {
                run_migrations(pool.pool()).await?;
            }
            let pg = pool.pool().clone();
            StateParts {
                documents: Arc::new(DocumentRepository::new(pg.clone())),
                profiles: Arc::new(ProfileRepository::new(pg.clone())),
                share_links: Arc::new(ShareLinkRepository::new(pg)),
                db_pool: Some(pool),
                storage,
                ocr: ollama.clone(),
                analyzer: ollama.clone(),
                assistant: ollama.clone(),
                ollama: Some(ollama),
            }
        }
        StoreBackend::Memory => {
            warn!("Using in-memory stores; documents, profiles and share links are lost on restart");
            StateParts {
                documents: Arc::new(MemoryDocumentStore::new()),
                profiles: Arc::new(MemoryProfileStore::new()),
                share_links: Arc::new(MemoryShareLinkRegistry::new()),
                db_pool: None,
                storage,
                ocr: ollama.clone(),
                analyzer: ollama.clone(),
                assistant: ollama.clone(),
                ollama: Some(ollama),
            }
        }
    };

    if config.demo.enabled {
        info!(user_id = %config.demo.user_id, "Demo account enabled");
    }

    Ok(AppState::new(config, parts))
}

/// Runs the MediVault server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting MediVault server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = config.server.cors.clone();
    let state = build_state(config).await?;
    let db_pool = state.db_pool.clone();

    let app = build_app(state, &cors);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("MediVault server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }
    info!("MediVault server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
