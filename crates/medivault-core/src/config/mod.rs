//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default so that an empty file (or no file at
//! all) yields a runnable development setup backed by in-memory stores.

pub mod app;
pub mod auth;
pub mod database;
pub mod demo;
pub mod ingestion;
pub mod logging;
pub mod share;
pub mod storage;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::demo::DemoConfig;
pub use self::ingestion::IngestionConfig;
pub use self::logging::LoggingConfig;
pub use self::share::ShareConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides, e.g. `MEDIVAULT__SERVER__PORT`.
const ENV_PREFIX: &str = "MEDIVAULT";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document, share-link and profile store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Bearer token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object storage settings for uploaded files.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Public share link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// OCR and AI service settings.
    #[serde(default)]
    pub ingestion: IngestionConfig,
    /// Demo account settings.
    #[serde(default)]
    pub demo: DemoConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Layers, lowest priority first: the given file, an environment overlay
    /// `{dir}/{MEDIVAULT_ENV}.toml` next to it (when `MEDIVAULT_ENV` is set),
    /// and `MEDIVAULT__*` environment variables. Missing files are skipped.
    pub fn load(config_path: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false));

        if let Ok(env) = std::env::var("MEDIVAULT_ENV") {
            let dir = Path::new(config_path)
                .parent()
                .unwrap_or_else(|| Path::new("."));
            let overlay = dir.join(format!("{env}.toml"));
            builder = builder.add_source(config::File::from(overlay).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.backend == StoreBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.backend = \"postgres\"",
            ));
        }
        if self.share.public_base_url.is_empty() {
            return Err(AppError::configuration("share.public_base_url must not be empty"));
        }
        if self.demo.enabled && self.demo.user_id.is_empty() {
            return Err(AppError::configuration(
                "demo.user_id must be set when the demo account is enabled",
            ));
        }
        Ok(())
    }
}
