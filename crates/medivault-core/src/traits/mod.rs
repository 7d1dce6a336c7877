//! Core traits defined in `medivault-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
