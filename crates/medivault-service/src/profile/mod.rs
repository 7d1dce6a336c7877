//! Health profile and the public emergency read path.

pub mod service;

pub use service::{EmergencyView, ProfileService, ProfileView, UpdateProfileParams};
