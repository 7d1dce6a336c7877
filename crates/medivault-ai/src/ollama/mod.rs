//! Ollama-compatible model server client.

mod analyzer;
mod assistant;
mod client;
mod ocr;

pub use client::OllamaClient;
