//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use chrono::{TimeDelta, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::sync::watch;
use tower::ServiceExt;

use medivault_ai::{AssistantModel, DocumentAnalyzer, OcrEngine, TextStream};
use medivault_api::{AppState, StateParts, build_app};
use medivault_core::config::{AppConfig, StoreBackend};
use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_database::memory::{
    MemoryDocumentStore, MemoryProfileStore, MemoryShareLinkRegistry,
};
use medivault_entity::analysis::{DocumentAnalysis, HealthFinding};
use medivault_storage::LocalStorageProvider;

/// User id of the demo account in tests.
pub const DEMO_USER: &str = "demo-user";

/// Text the fake OCR engine "reads" from every image.
pub const OCR_TEXT: &str = "Hemoglobin 13.5 g/dL";

/// OCR engine that reports two progress steps and returns [`OCR_TEXT`].
#[derive(Debug)]
pub struct FakeOcr;

#[async_trait]
impl OcrEngine for FakeOcr {
    async fn recognize(&self, _image: Bytes, progress: &watch::Sender<f32>) -> AppResult<String> {
        progress.send_replace(0.5);
        tokio::task::yield_now().await;
        progress.send_replace(1.0);
        Ok(OCR_TEXT.to_string())
    }
}

/// Analyzer whose summary works and whose health analysis fails.
#[derive(Debug)]
pub struct FakeAnalyzer;

#[async_trait]
impl DocumentAnalyzer for FakeAnalyzer {
    async fn summarize_and_tag(&self, text: &str) -> AppResult<DocumentAnalysis> {
        Ok(DocumentAnalysis {
            summary: format!("Summary of {} characters", text.len()),
            suggested_tags: vec!["Lab Results".to_string()],
        })
    }

    async fn analyze_health_report(&self, _text: &str) -> AppResult<Vec<HealthFinding>> {
        Err(AppError::external_service("model offline"))
    }
}

/// Assistant whose reply says whether the MRI fixture was in its context.
#[derive(Debug)]
pub struct FakeAssistant;

#[async_trait]
impl AssistantModel for FakeAssistant {
    async fn stream_reply(&self, _system: &str, prompt: &str) -> AppResult<TextStream> {
        let mentions_mri = prompt.contains("MRI Scan");
        let chunks = vec![
            Ok("Based on your documents, ".to_string()),
            Ok(if mentions_mri {
                "your knee MRI is on file.".to_string()
            } else {
                "I found nothing relevant.".to_string()
            }),
        ];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Share registry, for arranging link state directly
    pub share_links: Arc<MemoryShareLinkRegistry>,
    _storage_dir: TempDir,
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`], with config adjustments applied last
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.server.trust_proxy_headers = true;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root_path = storage_dir.path().to_string_lossy().into_owned();
        config.storage.max_upload_size_bytes = 1024 * 1024;
        config.share.public_base_url = "https://vault.test".to_string();
        config.demo.user_id = DEMO_USER.to_string();
        adjust(&mut config);

        let storage = Arc::new(
            LocalStorageProvider::new(storage_dir.path())
                .await
                .expect("Failed to init storage"),
        );
        let share_links = Arc::new(MemoryShareLinkRegistry::new());

        let parts = StateParts {
            db_pool: None,
            documents: Arc::new(MemoryDocumentStore::new()),
            profiles: Arc::new(MemoryProfileStore::new()),
            share_links: share_links.clone(),
            storage,
            ocr: Arc::new(FakeOcr),
            analyzer: Arc::new(FakeAnalyzer),
            assistant: Arc::new(FakeAssistant),
            ollama: None,
        };

        let state = AppState::new(config.clone(), parts);
        let router = build_app(state, &config.server.cors);

        Self {
            router,
            config,
            share_links,
            _storage_dir: storage_dir,
        }
    }

    /// Mint a bearer token for `user_id`
    pub fn token(&self, user_id: &str) -> String {
        let now = Utc::now();
        let claims = json!({
            "sub": user_id,
            "email": format!("{user_id}@test.com"),
            "iat": now.timestamp(),
            "exp": (now + TimeDelta::hours(1)).timestamp(),
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a multipart request
    pub async fn multipart(&self, path: &str, parts: &[Part], token: &str) -> TestResponse {
        const BOUNDARY: &str = "medivault-test-boundary";

        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match &part.file_name {
                Some(f) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{f}\"\r\n",
                    part.name
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
            };
            body.extend_from_slice(disposition.as_bytes());
            if let Some(ct) = &part.content_type {
                body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let raw = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
            raw,
        }
    }

    /// Save a text-only document for `token`'s user and return its id
    pub async fn create_document(&self, token: &str, file_name: &str, text: &str) -> String {
        let response = self
            .multipart(
                "/api/documents",
                &[
                    Part::text("file_name", file_name),
                    Part::text("tags", "Lab Results"),
                    Part::text("extracted_text", text),
                ],
                token,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Document save failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No id in document response")
            .to_string()
    }

    /// Create a share link on `document_id` and return its id
    pub async fn create_share(
        &self,
        token: &str,
        document_id: &str,
        duration: &str,
        max_views: u32,
    ) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/documents/{document_id}/shares"),
                Some(json!({ "duration": duration, "max_views": max_views })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Share creation failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No id in share response")
            .to_string()
    }
}

/// One multipart form field
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    /// A plain text field
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }

    /// A file field, with an optional declared content type
    pub fn file(name: &str, file_name: &str, content_type: Option<&str>, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: content_type.map(str::to_string),
            data: data.to_vec(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Content-Type` header, empty if absent
    pub content_type: String,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
    /// Raw body bytes
    pub raw: Bytes,
}

impl TestResponse {
    /// Body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    /// Body parsed as newline-delimited JSON
    pub fn ndjson(&self) -> Vec<Value> {
        self.text()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("Invalid NDJSON line"))
            .collect()
    }
}
