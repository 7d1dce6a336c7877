//! Share link domain entities.

pub mod model;
pub mod policy;

pub use model::{AccessLogEntry, CreateShareLink, ShareLink};
pub use policy::{AccessCheck, ShareDuration, ViewLimit, ViewsRemaining};
