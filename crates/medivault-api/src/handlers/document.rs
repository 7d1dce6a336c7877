//! Document handlers: CRUD plus the streaming analyze endpoint.

use std::convert::Infallible;

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::error;

use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_entity::analysis::IngestionReport;
use medivault_entity::document::MedicalDocument;
use medivault_service::ingestion::MediaKind;
use medivault_service::{SaveDocumentParams, UploadedFile};

use crate::dto::response::{AnalyzeEvent, ApiResponse};
use crate::extractors::AuthUser;
use crate::extractors::path::parse_uuid;
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MedicalDocument>>>, AppError> {
    let documents = state.document_service.list_documents(&auth).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MedicalDocument>>, AppError> {
    let document = state.document_service.get_document(&auth, parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.document_service.delete_document(&auth, parse_uuid(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/documents (multipart)
///
/// Fields: `file_name`, `tags` (repeatable or comma separated), `summary`,
/// `extracted_text` and an optional `file`.
pub async fn save_document(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MedicalDocument>>), AppError> {
    let mut params = SaveDocumentParams::default();
    let mut upload_name: Option<String> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file_name" => params.file_name = text(field).await?,
            "tags" => params
                .tags
                .extend(text(field).await?.split(',').map(str::to_string)),
            "summary" => params.summary = Some(text(field).await?),
            "extracted_text" => params.extracted_text = Some(text(field).await?),
            "file" => {
                upload_name = field.file_name().map(String::from);
                let media_type = field.content_type().map(String::from);
                let data = bytes(field).await?;
                params.file = Some(UploadedFile { media_type, data });
            }
            _ => {}
        }
    }

    if params.file_name.trim().is_empty() {
        params.file_name = upload_name.unwrap_or_default();
    }

    let document = state.document_service.save_document(&auth, params).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// POST /api/documents/analyze (multipart, `file` field)
///
/// Streams NDJSON: `progress` events while OCR runs, then one `result` or
/// `error` event.
pub async fn analyze_document(
    State(state): State<AppState>,
    _auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let media_type = field.content_type().map(String::from);
            upload = Some((file_name, media_type, bytes(field).await?));
        }
    }

    let (file_name, media_type, data) =
        upload.ok_or_else(|| AppError::validation("No file provided"))?;
    if data.len() as u64 > state.config.storage.max_upload_size_bytes {
        return Err(AppError::validation(format!(
            "File exceeds maximum upload size of {} bytes",
            state.config.storage.max_upload_size_bytes
        )));
    }
    // Unsupported types are rejected before the stream starts.
    MediaKind::detect(media_type.as_deref(), &file_name)?;

    let (tx, rx) = watch::channel(0.0_f32);
    let pipeline = state.ingestion.clone();
    let task = tokio::spawn(async move {
        pipeline
            .run(&file_name, media_type.as_deref(), data, &tx)
            .await
    });

    // The sender lives in the task, so `changed()` fails once it is done.
    let events = futures::stream::unfold((rx, Some(task)), |(mut rx, task)| async move {
        let task = task?;
        match rx.changed().await {
            Ok(()) => {
                let progress = *rx.borrow_and_update();
                Some((AnalyzeEvent::Progress { progress }, (rx, Some(task))))
            }
            Err(_) => Some((finish(task.await), (rx, None))),
        }
    });

    let body = Body::from_stream(events.map(|event| {
        let mut line = serde_json::to_vec(&event).unwrap_or_default();
        line.push(b'\n');
        Ok::<_, Infallible>(Bytes::from(line))
    }));

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    )
        .into_response())
}

fn finish(result: Result<AppResult<IngestionReport>, JoinError>) -> AnalyzeEvent {
    match result {
        Ok(Ok(report)) => AnalyzeEvent::Result { report },
        Ok(Err(e)) => {
            error!(kind = %e.kind, error = %e.message, "Document analysis failed");
            AnalyzeEvent::Error {
                error: e.kind.to_string(),
                message: e.message,
            }
        }
        Err(e) => {
            error!(error = %e, "Document analysis task failed");
            AnalyzeEvent::Error {
                error: "INTERNAL".to_string(),
                message: "Document analysis was interrupted".to_string(),
            }
        }
    }
}

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

async fn bytes(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}
