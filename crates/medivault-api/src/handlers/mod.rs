//! HTTP request handlers, one module per resource.

pub mod assistant;
pub mod document;
pub mod health;
pub mod profile;
pub mod share;
