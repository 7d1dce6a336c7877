//! # medivault-ai
//!
//! The AI collaborators of MediVault: OCR for uploaded images, document
//! summarization and health-finding extraction, and the streaming document
//! assistant. The traits in [`traits`] are what the service layer depends
//! on; [`ollama`] implements them against an Ollama-compatible HTTP API.

pub mod ollama;
pub mod prompts;
pub mod traits;

pub use ollama::OllamaClient;
pub use traits::{AssistantModel, DocumentAnalyzer, OcrEngine, TextStream};
