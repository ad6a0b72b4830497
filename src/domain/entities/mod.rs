//! Core domain entities.
//!
//! - [`AliasRecord`] - A persisted alias to target URL mapping

pub mod alias_record;

pub use alias_record::AliasRecord;
