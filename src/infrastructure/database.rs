//! SQLite connection pool setup.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Pool tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&Config> for PoolSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_connections: config.db_max_connections,
            connect_timeout: Duration::from_secs(config.db_connect_timeout),
            busy_timeout: Duration::from_secs(config.db_busy_timeout),
        }
    }
}

/// Opens the SQLite pool described by `config`.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    open(&config.database_url, PoolSettings::from(config)).await
}

/// Opens a SQLite pool at `database_url`.
///
/// The database file and its parent directory are created when missing.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed, the directory cannot be
/// created, or no connection can be established within the connect timeout.
pub async fn open(database_url: &str, settings: PoolSettings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{}'", database_url))?
        .create_if_missing(true)
        .busy_timeout(settings.busy_timeout);

    let filename = options.get_filename();
    if let Some(parent) = filename.parent()
        && !parent.as_os_str().is_empty()
        && filename != std::path::Path::new(":memory:")
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create storage directory {}", parent.display()))?;
    }

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

/// Applies the embedded migrations from `./migrations`.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")
}
