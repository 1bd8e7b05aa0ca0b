//! CLI administration tool for the link registry.
//!
//! Drives the same registry operations as the HTTP API directly against
//! PostgreSQL, without requiring the server to be running.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- link list
//!
//! # Show one link (does not count a click)
//! cargo run --bin admin -- link get promo
//!
//! # Create a link with a generated or custom code
//! cargo run --bin admin -- link create https://example.com
//! cargo run --bin admin -- link create https://example.com --code promo
//!
//! # Delete a link
//! cargo run --bin admin -- link delete promo --yes
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`:
//!   PostgreSQL connection settings
//! - `CODE_LENGTH`, `CODE_MAX_LENGTH`, `CODE_ATTEMPTS_PER_LENGTH`: generated
//!   code policy, shared with the server

use link_registry::application::services::{CodePolicy, LinkRegistry};
use link_registry::config;
use link_registry::domain::entities::Link;
use link_registry::domain::error::RegistryError;
use link_registry::infrastructure::persistence::PgLinkStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the link registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Get {
        /// Short code
        code: String,
    },

    /// Create a link
    Create {
        /// Destination URL
        url: String,

        /// Custom short code (generated if not provided)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Permanently delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("admin requires STORAGE_BACKEND=postgres")?;
    let policy = config.code_policy()?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, policy).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, policy: CodePolicy) -> Result<()> {
    let store = Arc::new(PgLinkStore::new(Arc::new(pool.clone())));
    let registry = LinkRegistry::with_policy(store, policy);

    match action {
        LinkAction::List => list_links(&registry).await?,
        LinkAction::Get { code } => show_link(&registry, &code).await?,
        LinkAction::Create { url, code } => create_link(&registry, url, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&registry, &code, yes).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code         Clicks   Created            Destination
///   ─────────────────────────────────────────────────────────────────────────
///   promo        12       2025-01-15 10:30   https://example.com/summer
/// ```
async fn list_links(registry: &LinkRegistry<PgLinkStore>) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = registry.list().await?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(registry: &LinkRegistry<PgLinkStore>, code: &str) -> Result<()> {
    match registry.get(code).await {
        Ok(link) => {
            print_link(&link);
            Ok(())
        }
        Err(RegistryError::NotFound(_)) => {
            println!("{}", format!("❌ No link with code '{code}'").red());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Creates a link, reporting conflicts and invalid input without failing the process.
async fn create_link(
    registry: &LinkRegistry<PgLinkStore>,
    url: String,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    match registry.create(url, code).await {
        Ok(link) => {
            println!("{}", "✅ Link created successfully!".green().bold());
            println!();
            print_link(&link);
            Ok(())
        }
        Err(RegistryError::CodeConflict(code)) => {
            println!("{}", format!("⚠️  Code '{code}' is already taken").yellow());
            Ok(())
        }
        Err(RegistryError::InvalidInput(msg)) => {
            println!("{}", format!("❌ {msg}").red());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    registry: &LinkRegistry<PgLinkStore>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = match registry.get(code).await {
        Ok(link) => link,
        Err(RegistryError::NotFound(_)) => {
            println!("{}", format!("❌ No link with code '{code}'").red());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? The code becomes available again.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match registry.delete(code).await {
        Ok(()) => {
            println!();
            println!("{}", "✅ Link deleted".green().bold());
            println!();
            Ok(())
        }
        // Someone else removed it between the lookup and the delete.
        Err(RegistryError::NotFound(_)) => {
            println!("{}", "⚠️  Link was already deleted".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_link(link: &Link) {
    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Destination:  {}", link.original_url.bright_white());
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match link.last_clicked_at {
        Some(at) => println!("  Last clicked: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Last clicked: {}", "never".bright_black()),
    }
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("links table is missing; start the server once to migrate")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links_count.to_string().bright_green().bold());
        }
    }

    Ok(())
}
