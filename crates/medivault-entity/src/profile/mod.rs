//! Health profile entities.

pub mod model;

pub use model::{EmergencyContact, HealthProfile, UpsertProfile};
