//! Document-grounded assistant.

pub mod service;

pub use service::{AssistantService, MAX_CONTEXT_DOCUMENTS};
