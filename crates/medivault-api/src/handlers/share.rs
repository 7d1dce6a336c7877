//! Share link handlers: owner creation and listing, public resolution.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use medivault_core::error::AppError;
use medivault_service::{ShareLinkView, ShareStatus};

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{ApiResponse, ShareAccessResponse};
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, RemoteClient};
use crate::state::AppState;

/// GET /share/{id}
///
/// Public. Every outcome has a JSON body; the status code carries the class.
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
    client: RemoteClient,
) -> Response {
    let outcome = state
        .access_service
        .resolve(&id, client.into_inner())
        .await;
    let body = ShareAccessResponse::from(outcome);
    (status_code(body.status), Json(body)).into_response()
}

/// HTTP status for a resolution status.
pub fn status_code(status: ShareStatus) -> StatusCode {
    match status {
        ShareStatus::Valid => StatusCode::OK,
        ShareStatus::NotFound => StatusCode::NOT_FOUND,
        ShareStatus::Expired => StatusCode::GONE,
        ShareStatus::LimitReached => StatusCode::FORBIDDEN,
        ShareStatus::Error => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// POST /api/documents/{id}/shares
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(document_id): Path<String>,
    Json(req): Json<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareLinkView>>), AppError> {
    // The document is checked on first access, not here.
    let document_id = parse_uuid(&document_id)?;
    let view = state
        .share_service
        .create_share_link(&auth, document_id, req.duration, req.max_views)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// GET /api/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ShareLinkView>>>, AppError> {
    let links = state.share_service.list_share_links(&auth).await?;
    Ok(Json(ApiResponse::ok(links)))
}
