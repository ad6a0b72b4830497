//! Utility functions for alias generation, URL checks and error classification.
//!
//! - [`alias_generator`] - Random alias generation and custom alias validation
//! - [`target_url`] - Target URL validation
//! - [`db_error`] - SQLx error classification

pub mod alias_generator;
pub mod db_error;
pub mod target_url;
