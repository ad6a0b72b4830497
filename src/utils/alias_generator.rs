//! Alias generation and validation utilities.
//!
//! Provides random alias generation for requests that do not name one, and
//! validation for user-provided aliases.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet random aliases are drawn from.
pub const ALIAS_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated aliases unless configured otherwise.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Longest alias a caller may supply.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Path segments taken by the router that an alias must not shadow.
const RESERVED_ALIASES: &[&str] = &["url", "health"];

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Source of candidate aliases.
///
/// Implementations make no uniqueness promise. The store decides whether a
/// candidate is free.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Returns a fresh candidate alias.
    fn generate(&self) -> String;
}

/// Generates fixed-length aliases from [`ALIAS_ALPHABET`].
#[derive(Debug, Clone, Copy)]
pub struct RandomAliasGenerator {
    length: usize,
}

impl RandomAliasGenerator {
    /// Creates a generator producing aliases of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomAliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..ALIAS_ALPHABET.len());
                ALIAS_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("ex1").is_ok());
/// assert!(validate_custom_alias("my-link_2024").is_ok());
///
/// assert!(validate_custom_alias("").is_err());          // Empty
/// assert!(validate_custom_alias("a/b").is_err());       // Slash
/// assert!(validate_custom_alias("health").is_err());    // Reserved
/// ```
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!("field alias must be 1-{MAX_ALIAS_LENGTH} characters"),
            json!({ "alias": [format!("length must be 1-{MAX_ALIAS_LENGTH}")] }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "field alias can only contain letters, digits, '_' and '-'",
            json!({ "alias": ["invalid characters"] }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "field alias is reserved",
            json!({ "alias": ["reserved"] }),
        ));
    }

    Ok(())
}
