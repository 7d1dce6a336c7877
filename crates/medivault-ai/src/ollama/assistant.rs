//! Streaming assistant replies.

use async_trait::async_trait;

use medivault_core::result::AppResult;

use super::client::{GenerateRequest, OllamaClient};
use crate::traits::{AssistantModel, TextStream};

#[async_trait]
impl AssistantModel for OllamaClient {
    async fn stream_reply(&self, system: &str, prompt: &str) -> AppResult<TextStream> {
        self.generate_stream(&GenerateRequest {
            model: &self.text_model,
            prompt,
            system: Some(system),
            images: Vec::new(),
            format: None,
            stream: true,
        })
        .await
    }
}
