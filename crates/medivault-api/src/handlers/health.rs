//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db_pool {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "connected",
            Ok(false) => "unavailable",
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                "unavailable"
            }
        },
        None => "memory",
    };

    let storage = match state.storage.health_check().await {
        Ok(true) => "available",
        Ok(false) => "unavailable",
        Err(e) => {
            warn!(error = %e, "Storage health check failed");
            "unavailable"
        }
    };

    let ai = match &state.ollama {
        Some(client) if client.is_available().await => "available",
        Some(_) => "unavailable",
        None => "disabled",
    };

    // The AI backend is optional for reads, so it does not degrade the status.
    let status = if database == "unavailable" || storage == "unavailable" {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
        ai: ai.to_string(),
    }))
}
