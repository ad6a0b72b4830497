//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`database`] - SQLite pool construction and migrations
//! - [`persistence`] - Alias store implementations

pub mod database;
pub mod persistence;
