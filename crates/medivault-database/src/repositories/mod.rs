//! PostgreSQL implementations of the persistence traits.

pub mod document;
pub mod profile;
pub mod share;

pub use document::DocumentRepository;
pub use profile::ProfileRepository;
pub use share::ShareLinkRepository;
