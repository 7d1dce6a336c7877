//! # medivault-storage
//!
//! Object storage for the raw files behind medical documents. Only the local
//! filesystem provider ships; other backends plug in through
//! [`StorageProvider`](medivault_core::traits::storage::StorageProvider).

pub mod keys;
pub mod providers;

pub use keys::{document_key, mime_from_path};
pub use providers::LocalStorageProvider;
