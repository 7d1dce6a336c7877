//! Assistant handler: streams the model's answer as chunked plain text.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tracing::warn;

use medivault_core::error::AppError;

use crate::dto::request::{AskRequest, validated};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/assistant
pub async fn ask(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AskRequest>,
) -> Result<Response, AppError> {
    let req = validated(req)?;
    let stream = state.assistant_service.ask(&auth, &req.query).await?;

    let user_id = auth.user_id.clone();
    let chunks = stream.map(move |chunk| {
        chunk.inspect_err(|e| warn!(user_id = %user_id, error = %e, "Assistant stream interrupted"))
    });

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks),
    )
        .into_response())
}
