//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The alias record and the store contract
//! - **Application Layer** ([`application`]) - Alias creation, lookup and removal
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory stores
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Caller-chosen or generated aliases, unique across the store
//! - Temporary redirects for saved aliases
//! - Basic-auth protected management endpoints
//! - Structured logging with per-request ids
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_USER="admin"
//! export HTTP_PASSWORD="change-me"
//!
//! # Migrations run on startup
//! cargo run
//!
//! curl -u admin:change-me -d '{"url":"https://example.com"}' localhost:8082/url
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::AliasService;
    pub use crate::domain::entities::AliasRecord;
    pub use crate::domain::repositories::{AliasRepository, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, Credentials};
}
