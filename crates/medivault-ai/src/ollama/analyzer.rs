//! Summaries, tags and health findings from a text model.

use async_trait::async_trait;
use serde::Deserialize;

use medivault_core::error::{AppError, ErrorKind};
use medivault_core::result::AppResult;
use medivault_entity::analysis::{DocumentAnalysis, HealthFinding};

use super::client::{GenerateRequest, OllamaClient};
use crate::prompts;
use crate::traits::DocumentAnalyzer;

#[derive(Debug, Deserialize)]
struct FindingsEnvelope {
    #[serde(default)]
    findings: Vec<HealthFinding>,
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> AppResult<T> {
    serde_json::from_str(raw.trim()).map_err(|e| {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Model returned malformed {what}"),
            e,
        )
    })
}

impl OllamaClient {
    async fn generate_json(&self, prompt: &str) -> AppResult<String> {
        self.generate(&GenerateRequest {
            model: &self.text_model,
            prompt,
            system: None,
            images: Vec::new(),
            format: Some("json"),
            stream: false,
        })
        .await
    }
}

#[async_trait]
impl DocumentAnalyzer for OllamaClient {
    async fn summarize_and_tag(&self, text: &str) -> AppResult<DocumentAnalysis> {
        let raw = self.generate_json(&prompts::summarize_and_tag(text)).await?;
        parse_json(&raw, "document analysis")
    }

    async fn analyze_health_report(&self, text: &str) -> AppResult<Vec<HealthFinding>> {
        let raw = self
            .generate_json(&prompts::analyze_health_report(text))
            .await?;
        let envelope: FindingsEnvelope = parse_json(&raw, "health findings")?;
        Ok(envelope.findings)
    }
}
