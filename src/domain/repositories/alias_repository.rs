//! Repository trait for alias storage.

use async_trait::async_trait;

/// Failures a store can report.
///
/// Every engine classifies its native errors into one of these kinds before
/// returning, so callers can react to a conflict or a missing alias without
/// inspecting driver details.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The alias is already bound to a record.
    #[error("alias already exists: {0}")]
    AliasExists(String),

    /// No record has this alias.
    #[error("alias not found: {0}")]
    NotFound(String),

    /// The alias is empty and can never be stored.
    #[error("alias must not be empty")]
    InvalidAlias,

    /// Underlying I/O or connectivity failure.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps any infrastructure error as [`StoreError::Unavailable`].
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Box::new(err))
    }
}

/// Repository interface for alias to URL mappings.
///
/// Uniqueness of `alias` is enforced by the implementation at insert time.
/// Callers must not emulate it with a lookup before saving.
///
/// # Examples
///
/// See integration tests: `tests/repository_alias.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Stores a new mapping and returns the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if `alias` is already bound; the
    /// existing mapping is left untouched.
    ///
    /// Returns [`StoreError::InvalidAlias`] if `alias` is empty.
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn save_url(&self, target_url: &str, alias: &str) -> Result<i64, StoreError>;

    /// Looks up the target URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that alias.
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn get_url(&self, alias: &str) -> Result<String, StoreError>;

    /// Removes the record bound to `alias` and returns the URL it pointed to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that alias.
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn delete_url(&self, alias: &str) -> Result<String, StoreError>;

    /// Checks that the storage backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
