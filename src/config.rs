//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then handed to the
//! components that need it. Nothing reads the environment after that.
//!
//! ## Example
//!
//! ```bash
//! export APP_ENV="prod"
//! export DATABASE_URL="sqlite://storage/storage.db"
//! export LISTEN="0.0.0.0:8082"
//! export HTTP_USER="admin"
//! export HTTP_PASSWORD="change-me"
//! ```
//!
//! ## Required Variables
//!
//! - `HTTP_USER` / `HTTP_PASSWORD` - Basic-auth credentials for `/url`
//!
//! ## Optional Variables
//!
//! - `APP_ENV` - `local`, `dev` or `prod` (default: `local`)
//! - `DATABASE_URL` - SQLite location (default: `sqlite://storage/storage.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8082`)
//! - `RUST_LOG` - Log filter (default: `debug` for local/dev, `info` for prod)
//! - `LOG_FORMAT` - `text` or `json` (default: `text` for local, `json` otherwise)
//! - `REQUEST_TIMEOUT` - Per-request timeout in seconds (default: 4)
//! - `ALIAS_LENGTH` - Generated alias length (default: 6)
//! - `ALIAS_MAX_ATTEMPTS` - Generated aliases tried per save (default: 5)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 5)
//! - `DB_BUSY_TIMEOUT` - SQLite busy timeout in seconds (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, MAX_ALIAS_LENGTH};

/// Deployment environment. Picks logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }

    fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Local | Environment::Dev => "debug",
            Environment::Prod => "info",
        }
    }

    fn default_log_format(&self) -> &'static str {
        match self {
            Environment::Local => "text",
            Environment::Dev | Environment::Prod => "json",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => anyhow::bail!("APP_ENV must be 'local', 'dev' or 'prod', got '{}'", other),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub http_user: String,
    pub http_password: String,
    /// Upper bound on handling a single request, in seconds.
    pub request_timeout: u64,
    pub alias_length: usize,
    /// Generated aliases tried per save before giving up.
    pub alias_max_attempts: usize,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 5).
    pub db_connect_timeout: u64,
    /// How long SQLite waits on a locked database in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self> {
        let env = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::Local,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://storage/storage.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8082".to_string());
        let log_level =
            env::var("RUST_LOG").unwrap_or_else(|_| env.default_log_level().to_string());
        let log_format =
            env::var("LOG_FORMAT").unwrap_or_else(|_| env.default_log_format().to_string());

        let http_user = env::var("HTTP_USER").context("HTTP_USER must be set")?;
        let http_password = env::var("HTTP_PASSWORD").context("HTTP_PASSWORD must be set")?;

        Ok(Self {
            env,
            database_url,
            listen_addr,
            log_level,
            log_format,
            http_user,
            http_password,
            request_timeout: parse_var("REQUEST_TIMEOUT", 4)?,
            alias_length: parse_var("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH)?,
            alias_max_attempts: parse_var("ALIAS_MAX_ATTEMPTS", 5)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            db_connect_timeout: parse_var("DB_CONNECT_TIMEOUT", 5)?,
            db_busy_timeout: parse_var("DB_BUSY_TIMEOUT", 5)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a `sqlite:` URL
    /// - credentials are empty
    /// - a numeric setting is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.http_user.is_empty() || self.http_password.is_empty() {
            anyhow::bail!("HTTP_USER and HTTP_PASSWORD must not be empty");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("REQUEST_TIMEOUT must be greater than 0");
        }

        if self.alias_length == 0 || self.alias_length > MAX_ALIAS_LENGTH {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and {}, got {}",
                MAX_ALIAS_LENGTH,
                self.alias_length
            );
        }

        if self.alias_max_attempts == 0 || self.alias_max_attempts > 100 {
            anyhow::bail!(
                "ALIAS_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.alias_max_attempts
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env.as_str());
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  HTTP user: {} (password: ***)", self.http_user);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Aliases: length {}, {} attempts",
            self.alias_length,
            self.alias_max_attempts
        );
    }
}

/// Parses an optional variable, falling back to `default` when unset.
///
/// A set but unparsable value is an error rather than a silent default.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
