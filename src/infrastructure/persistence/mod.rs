//! Alias store engines.
//!
//! Concrete implementations of [`crate::domain::repositories::AliasRepository`].
//!
//! # Repositories
//!
//! - [`SqliteAliasRepository`] - durable storage on SQLite through SQLx
//! - [`MemoryAliasRepository`] - process-local storage for tests and ephemeral runs

pub mod memory_alias_repository;
pub mod sqlite_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
pub use sqlite_alias_repository::SqliteAliasRepository;
