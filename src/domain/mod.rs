//! Domain layer containing the alias model and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait definitions and their error taxonomy
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
