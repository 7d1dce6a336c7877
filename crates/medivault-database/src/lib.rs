//! # medivault-database
//!
//! Persistence for MediVault. The service layer talks to the
//! [`traits`] only; this crate ships a PostgreSQL implementation of each
//! (under [`repositories`]), a process-local one (under [`memory`]) and the
//! read-only demo [`fixtures`].

pub mod connection;
pub mod fixtures;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use traits::{DocumentSource, ProfileSource, RecordView, ShareLinkRegistry};
