//! CLI administration tool for url-shortener.
//!
//! Manages aliases and inspects the database directly, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Save a URL under a generated alias
//! cargo run --bin admin -- alias add https://example.com
//!
//! # Save a URL under a chosen alias
//! cargo run --bin admin -- alias add https://example.com --alias ex1
//!
//! # Show where an alias points
//! cargo run --bin admin -- alias show ex1
//!
//! # Remove an alias
//! cargo run --bin admin -- alias remove ex1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite location, defaults to `sqlite://storage/storage.db`
//! - `ALIAS_LENGTH` (optional): generated alias length, defaults to 6

use url_shortener::application::services::AliasService;
use url_shortener::application::services::alias_service::DEFAULT_MAX_ATTEMPTS;
use url_shortener::infrastructure::database::{self, PoolSettings};
use url_shortener::infrastructure::persistence::SqliteAliasRepository;
use url_shortener::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, RandomAliasGenerator};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
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
    /// Manage aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Alias management subcommands.
#[derive(Subcommand)]
enum AliasAction {
    /// Save a URL under an alias
    Add {
        /// Target URL (http or https)
        url: String,

        /// Alias to use (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL behind an alias
    Show {
        alias: String,
    },

    /// Remove an alias
    Remove {
        alias: String,

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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://storage/storage.db".to_string());

    let pool = database::open(&database_url, PoolSettings::default()).await?;
    database::migrate(&pool).await?;

    match cli.command {
        Commands::Alias { action } => handle_alias_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

/// Dispatches alias management commands.
async fn handle_alias_action(action: AliasAction, pool: &SqlitePool) -> Result<()> {
    let alias_length = match std::env::var("ALIAS_LENGTH") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("ALIAS_LENGTH has an invalid value '{}'", value))?,
        Err(_) => DEFAULT_ALIAS_LENGTH,
    };

    let service = AliasService::new(
        Arc::new(SqliteAliasRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomAliasGenerator::new(alias_length)),
        DEFAULT_MAX_ATTEMPTS,
    );

    match action {
        AliasAction::Add { url, alias } => add_alias(&service, url, alias).await?,
        AliasAction::Show { alias } => show_alias(&service, &alias).await?,
        AliasAction::Remove { alias, yes } => remove_alias(&service, &alias, yes).await?,
    }

    Ok(())
}

/// Saves a URL and prints the alias it landed under.
async fn add_alias(service: &AliasService, url: String, alias: Option<String>) -> Result<()> {
    println!("{}", "🔗 Add Alias".bright_blue().bold());
    println!();

    let record = service
        .save(url, alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save alias: {}", e))?;

    println!("{}", "✅ Alias saved".green().bold());
    println!();
    println!("  ID:    {}", record.id.to_string().bright_black());
    println!("  Alias: {}", record.alias.bright_yellow().bold());
    println!("  URL:   {}", record.target_url.cyan());
    println!();

    Ok(())
}

async fn show_alias(service: &AliasService, alias: &str) -> Result<()> {
    let target_url = service
        .resolve(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up '{}': {}", alias, e))?;

    println!("  {} → {}", alias.bright_yellow(), target_url.cyan());

    Ok(())
}

/// Removes an alias with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Shows the target before asking
async fn remove_alias(service: &AliasService, alias: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Remove Alias".bright_blue().bold());
    println!();

    let target_url = service
        .resolve(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up '{}': {}", alias, e))?;

    println!("  Alias: {}", alias.bright_yellow());
    println!("  URL:   {}", target_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this alias?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove alias: {}", e))?;

    println!();
    println!("{}", "✅ Alias removed".green().bold());
    println!();

    Ok(())
}

/// Displays the number of stored aliases and the highest id handed out.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let aliases_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await?;

    let last_id: Option<i64> = sqlx::query_scalar("SELECT seq FROM sqlite_sequence WHERE name = 'url'")
        .fetch_optional(pool)
        .await?;

    println!(
        "  Aliases:  {}",
        aliases_count.to_string().bright_green().bold()
    );
    println!(
        "  Last id:  {}",
        last_id.unwrap_or(0).to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:   {}", version.bright_white());
            println!("  Location: {}", database_url.bright_white());
            println!();
        }
    }

    Ok(())
}
