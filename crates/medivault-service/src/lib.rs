//! # medivault-service
//!
//! Business logic service layer for MediVault. Each service orchestrates
//! the record sources, the object store and the AI collaborators to
//! implement one application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod assistant;
pub mod context;
pub mod document;
pub mod ingestion;
pub mod profile;
pub mod share;
pub mod sources;

pub use assistant::AssistantService;
pub use context::RequestContext;
pub use document::{DocumentService, SaveDocumentParams, UploadedFile};
pub use ingestion::IngestionPipeline;
pub use profile::{EmergencyView, ProfileService, ProfileView, UpdateProfileParams};
pub use share::{AccessService, ClientInfo, ShareLinkView, ShareOutcome, ShareService, ShareStatus};
pub use sources::DataSources;
