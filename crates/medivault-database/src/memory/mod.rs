//! Process-local stores backed by `DashMap`.
//!
//! Used for development, tests, and the `memory` backend. Contents are lost
//! when the process exits.

pub mod document;
pub mod profile;
pub mod share;

pub use document::MemoryDocumentStore;
pub use profile::MemoryProfileStore;
pub use share::MemoryShareLinkRegistry;
