//! HTTP client for the Ollama `/api/generate` endpoint.

use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;
use tracing::debug;

use medivault_core::config::IngestionConfig;
use medivault_core::error::{AppError, ErrorKind};
use medivault_core::result::AppResult;

use crate::traits::TextStream;

/// Longest NDJSON line accepted from the model server.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Body of a generate request.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a str>,
    pub stream: bool,
}

/// One generate response, or one line of a streamed response.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for an Ollama-compatible model server.
///
/// Implements [`OcrEngine`](crate::OcrEngine),
/// [`DocumentAnalyzer`](crate::DocumentAnalyzer) and
/// [`AssistantModel`](crate::AssistantModel).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) ocr_model: String,
    pub(crate) text_model: String,
    pub(crate) language: String,
}

impl OllamaClient {
    /// Build a client from the ingestion settings.
    pub fn new(config: &IngestionConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            ocr_model: config.ocr_model.clone(),
            text_model: config.text_model.clone(),
            language: config.language.clone(),
        })
    }

    /// Check whether the model server answers.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post(&self, request: &GenerateRequest<'_>) -> AppResult<reqwest::Response> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(model = request.model, stream = request.stream, "Calling model server");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Failed to call model server", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Model server returned {status}: {body}"
            )));
        }
        Ok(response)
    }

    /// Run a non-streaming generate call and return the response text.
    pub(crate) async fn generate(&self, request: &GenerateRequest<'_>) -> AppResult<String> {
        let chunk: GenerateChunk = self.post(request).await?.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to parse model server response",
                e,
            )
        })?;

        if let Some(error) = chunk.error {
            return Err(AppError::external_service(format!("Model server error: {error}")));
        }
        Ok(chunk.response)
    }

    /// Run a streaming generate call.
    pub(crate) async fn generate_stream(&self, request: &GenerateRequest<'_>) -> AppResult<TextStream> {
        let response = self.post(request).await?;
        Ok(decode_ndjson(response.bytes_stream()))
    }
}

/// Turn an NDJSON byte stream of generate chunks into text chunks.
///
/// Empty chunks are skipped and the stream ends at the `done` line.
pub(crate) fn decode_ndjson<S, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let reader = StreamReader::new(bytes.map_err(std::io::Error::other));
    let lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_BYTES));

    let chunks = lines
        .map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Model stream interrupted", e)
        })
        .try_filter(|line| futures::future::ready(!line.trim().is_empty()))
        .and_then(|line| async move {
            serde_json::from_str::<GenerateChunk>(&line).map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Malformed model stream line", e)
            })
        })
        .and_then(|chunk| async move {
            match chunk.error {
                Some(error) => Err(AppError::external_service(format!(
                    "Model server error: {error}"
                ))),
                None => Ok(chunk),
            }
        })
        .try_take_while(|chunk| {
            futures::future::ready(Ok::<_, AppError>(!chunk.done || !chunk.response.is_empty()))
        })
        .try_filter_map(|chunk| async move {
            Ok::<_, AppError>((!chunk.response.is_empty()).then_some(chunk.response))
        });

    Box::pin(chunks)
}
