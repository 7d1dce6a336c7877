//! Route definitions for the MediVault HTTP API.
//!
//! Authenticated routes are mounted under `/api`; the capability URLs
//! (`/share/{id}`, `/emergency/{user_id}`) sit at the root.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart framing and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(share_routes())
        .merge(profile_routes())
        .merge(assistant_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Document CRUD, ingestion and share creation
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(handlers::document::save_document),
        )
        .route(
            "/documents/analyze",
            post(handlers::document::analyze_document),
        )
        .route(
            "/documents/{id}",
            get(handlers::document::get_document).delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/shares",
            post(handlers::share::create_share),
        )
}

/// Owner's share links
fn share_routes() -> Router<AppState> {
    Router::new().route("/shares", get(handlers::share::list_shares))
}

/// Health profile
fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(handlers::profile::get_profile).put(handlers::profile::update_profile),
    )
}

/// Document assistant
fn assistant_routes() -> Router<AppState> {
    Router::new().route("/assistant", post(handlers::assistant::ask))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Unauthenticated capability URLs
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/share/{id}", get(handlers::share::resolve_share))
        .route(
            "/emergency/{user_id}",
            get(handlers::profile::emergency_profile),
        )
}
