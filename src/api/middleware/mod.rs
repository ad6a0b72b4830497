//! HTTP middleware for request processing and protection.
//!
//! Provides basic-auth protection and request tracing.

pub mod auth;
pub mod tracing;
