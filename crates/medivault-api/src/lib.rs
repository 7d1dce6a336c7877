//! # medivault-api
//!
//! HTTP API layer for MediVault built on Axum.
//!
//! Provides the authenticated REST endpoints under `/api`, the public
//! capability URLs for share links and emergency profiles, bearer token
//! verification, middleware (CORS, logging), extractors and DTOs.

pub mod app;
pub mod auth;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::{AppState, StateParts};
