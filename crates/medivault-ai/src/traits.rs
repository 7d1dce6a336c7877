//! AI collaborator traits.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use tokio::sync::watch;

use medivault_core::result::AppResult;
use medivault_entity::analysis::{DocumentAnalysis, HealthFinding};

/// A stream of text chunks from a model.
pub type TextStream = Pin<Box<dyn Stream<Item = AppResult<String>> + Send>>;

/// Extracts text from an image.
#[async_trait]
pub trait OcrEngine: Send + Sync + std::fmt::Debug + 'static {
    /// Recognize the text in `image`, publishing progress in `[0, 1]` on
    /// `progress` while working.
    async fn recognize(&self, image: Bytes, progress: &watch::Sender<f32>) -> AppResult<String>;
}

/// Analyzes extracted document text.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync + std::fmt::Debug + 'static {
    /// Concise summary plus suggested category tags.
    async fn summarize_and_tag(&self, text: &str) -> AppResult<DocumentAnalysis>;

    /// Notable terms with neutral, informational observations.
    async fn analyze_health_report(&self, text: &str) -> AppResult<Vec<HealthFinding>>;
}

/// Generates streamed answers.
#[async_trait]
pub trait AssistantModel: Send + Sync + std::fmt::Debug + 'static {
    /// Stream the model's reply to `prompt` under the `system` instructions.
    async fn stream_reply(&self, system: &str, prompt: &str) -> AppResult<TextStream>;
}
