//! Vision-model OCR.

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

use medivault_core::result::AppResult;

use super::client::{GenerateRequest, OllamaClient};
use crate::prompts;
use crate::traits::OcrEngine;

/// Progress reported once the request has been sent.
const STARTED: f32 = 0.05;

/// Progress after `chunks` streamed chunks. Approaches but never reaches 1.0;
/// completion is reported separately.
fn streaming_progress(chunks: usize) -> f32 {
    let n = chunks as f32;
    STARTED + 0.9 * (n / (n + 8.0))
}

#[async_trait]
impl OcrEngine for OllamaClient {
    async fn recognize(&self, image: Bytes, progress: &watch::Sender<f32>) -> AppResult<String> {
        let prompt = prompts::ocr_prompt(&self.language);
        let request = GenerateRequest {
            model: &self.ocr_model,
            prompt: &prompt,
            system: None,
            images: vec![base64::engine::general_purpose::STANDARD.encode(&image)],
            format: None,
            stream: true,
        };

        progress.send_replace(0.0);
        let mut stream = self.generate_stream(&request).await?;
        progress.send_replace(STARTED);

        let mut text = String::new();
        let mut chunks = 0usize;
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
            chunks += 1;
            progress.send_replace(streaming_progress(chunks));
        }

        progress.send_replace(1.0);
        debug!(bytes = image.len(), chars = text.len(), "OCR finished");
        Ok(text.trim().to_string())
    }
}
