//! Document inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use medivault_core::error::AppError;
use medivault_database::DocumentSource;
use medivault_database::repositories::DocumentRepository;
use medivault_entity::document::MedicalDocument;

use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocumentCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocumentCommand {
    /// List a user's documents, newest first
    List {
        /// Owner user id
        #[arg(long)]
        owner: String,
    },
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    file_name: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Type")]
    file_type: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Uploaded")]
    uploaded_at: String,
}

impl From<&MedicalDocument> for DocumentRow {
    fn from(doc: &MedicalDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            file_name: doc.file_name.clone(),
            tags: doc.tags.join(", "),
            file_type: doc.file_type.clone().unwrap_or_else(|| "-".to_string()),
            size: doc.file_size.map(format_size).unwrap_or_else(|| "-".to_string()),
            uploaded_at: doc.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute document commands
pub async fn execute(
    args: &DocumentArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let repo = DocumentRepository::new(pool.pool().clone());

    let result = match &args.command {
        DocumentCommand::List { owner } => repo.list_by_owner(owner).await.map(|docs| {
            let rows: Vec<DocumentRow> = docs.iter().map(DocumentRow::from).collect();
            output::print_list(&rows, format);
        }),
    };

    pool.close().await;
    result
}

fn format_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}
