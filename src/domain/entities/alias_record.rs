//! Alias record entity.

/// A persisted mapping from a short alias to its target URL.
///
/// `id` is assigned by the store when the record is created and never changes
/// afterwards. Records are never updated in place: they are created, read and
/// eventually deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub id: i64,
    pub alias: String,
    pub target_url: String,
}

impl AliasRecord {
    /// Creates a new AliasRecord instance.
    pub fn new(id: i64, alias: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            target_url: target_url.into(),
        }
    }
}
