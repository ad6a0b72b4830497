//! Repository trait definitions for the domain layer.
//!
//! The store is consumed only through [`AliasRepository`], so callers never
//! know which engine backs it.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::persistence::SqliteAliasRepository`] - SQLite via SQLx
//! - [`crate::infrastructure::persistence::MemoryAliasRepository`] - process-local map
//! - `MockAliasRepository` - generated by `mockall` under `cfg(test)`
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod alias_repository;

pub use alias_repository::{AliasRepository, StoreError};

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
