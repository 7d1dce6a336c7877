//! Share link inspection commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use medivault_core::error::AppError;
use medivault_database::ShareLinkRegistry;
use medivault_database::repositories::ShareLinkRepository;
use medivault_entity::share::{AccessCheck, AccessLogEntry, ShareLink};

use crate::output::{self, OutputFormat};

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// List share links created by a user
    List {
        /// Owner user id
        #[arg(long)]
        owner: String,
    },
    /// Show one share link with its access log
    Show {
        /// Share link id
        id: Uuid,
    },
}

/// Share link display row
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Document")]
    document_id: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Views")]
    views: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Expires")]
    expires_at: String,
}

impl ShareRow {
    fn new(link: &ShareLink, now: DateTime<Utc>) -> Self {
        let max = if link.max_views == 0 {
            "∞".to_string()
        } else {
            link.max_views.to_string()
        };
        Self {
            id: link.id.to_string(),
            document_id: link.document_id.to_string(),
            state: state_label(link.check_access(now)).to_string(),
            views: format!("{}/{}", link.view_count, max),
            remaining: link.views_remaining().to_string(),
            expires_at: link.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Access log display row
#[derive(Debug, Serialize, Tabled)]
struct AccessRow {
    #[tabled(rename = "Accessed")]
    accessed_at: String,
    #[tabled(rename = "IP")]
    ip_address: String,
    #[tabled(rename = "User Agent")]
    user_agent: String,
}

impl From<&AccessLogEntry> for AccessRow {
    fn from(entry: &AccessLogEntry) -> Self {
        Self {
            accessed_at: entry.accessed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ip_address: entry.ip_address.clone(),
            user_agent: entry.user_agent.clone(),
        }
    }
}

fn state_label(check: AccessCheck) -> &'static str {
    match check {
        AccessCheck::Open => "active",
        AccessCheck::Expired => "expired",
        AccessCheck::LimitReached => "limit reached",
    }
}

/// Execute share commands
pub async fn execute(
    args: &ShareArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let registry = ShareLinkRepository::new(pool.pool().clone());
    let now = Utc::now();

    let result = match &args.command {
        ShareCommand::List { owner } => registry.list_by_owner(owner).await.map(|links| {
            let rows: Vec<ShareRow> = links.iter().map(|l| ShareRow::new(l, now)).collect();
            output::print_list(&rows, format);
        }),
        ShareCommand::Show { id } => match registry.find_by_id(*id).await {
            Ok(Some(link)) => {
                show_link(&link, now, format);
                Ok(())
            }
            Ok(None) => Err(AppError::not_found(format!("Share link {id} not found"))),
            Err(e) => Err(e),
        },
    };

    pool.close().await;
    result
}

fn show_link(link: &ShareLink, now: DateTime<Utc>, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_item(link, format);
        return;
    }

    let row = ShareRow::new(link, now);
    println!("Share link {}", row.id);
    output::print_kv("Owner", &link.owner_id);
    output::print_kv("Document", &row.document_id);
    output::print_kv("State", &row.state);
    output::print_kv("Views", &row.views);
    output::print_kv("Remaining", &row.remaining);
    output::print_kv(
        "Created",
        &link.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    output::print_kv("Expires", &row.expires_at);
    println!();

    let access: Vec<AccessRow> = link.access_logs.iter().map(AccessRow::from).collect();
    output::print_list(&access, format);
}
