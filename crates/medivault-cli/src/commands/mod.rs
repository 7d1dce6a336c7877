//! CLI command definitions and dispatch.

pub mod config;
pub mod document;
pub mod migrate;
pub mod serve;
pub mod share;
pub mod token;

use clap::{Parser, Subcommand};

use medivault_core::config::{AppConfig, StoreBackend};
use medivault_core::error::AppError;
use medivault_database::DatabasePool;

use crate::output::OutputFormat;

/// MediVault: personal health documents with expiring share links
#[derive(Debug, Parser)]
#[command(name = "medivault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the MediVault server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Inspect share links and their access logs
    Share(share::ShareArgs),
    /// Inspect stored documents
    Document(document::DocumentArgs),
    /// Mint a bearer token for local testing
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Share(args) => share::execute(args, &self.config, self.format).await,
            Commands::Document(args) => document::execute(args, &self.config, self.format).await,
            Commands::Token(args) => token::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: connect to PostgreSQL, refusing the in-memory backend
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend != StoreBackend::Postgres {
        return Err(AppError::configuration(
            "This command needs database.backend = \"postgres\"; the in-memory store lives only inside a running server",
        ));
    }
    DatabasePool::connect(&config.database).await
}
