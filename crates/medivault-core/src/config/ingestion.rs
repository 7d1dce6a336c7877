//! OCR and AI service configuration.

use serde::{Deserialize, Serialize};

/// Settings for the document ingestion pipeline and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Base URL of the Ollama-compatible model server.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Vision model used for OCR.
    #[serde(default = "default_ocr_model")]
    pub ocr_model: String,
    /// Text model used for summaries, findings and the assistant.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// OCR language hint.
    #[serde(default = "default_language")]
    pub language: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Extracted text shorter than this (after trimming) is treated as
    /// nothing extracted.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            ocr_model: default_ocr_model(),
            text_model: default_text_model(),
            language: default_language(),
            request_timeout_seconds: default_timeout(),
            min_text_length: default_min_text_length(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ocr_model() -> String {
    "llava".to_string()
}

fn default_text_model() -> String {
    "llama3.1".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_min_text_length() -> usize {
    1
}
