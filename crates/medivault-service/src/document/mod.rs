//! Document services: listing, reading, saving and deleting records.

pub mod service;

pub use service::{DocumentService, SaveDocumentParams, UploadedFile};
