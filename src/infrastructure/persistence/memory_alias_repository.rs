//! In-memory implementation of the alias repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::AliasRecord;
use crate::domain::repositories::{AliasRepository, StoreError};

/// Process-local alias store backed by a [`DashMap`].
///
/// The check-and-insert happens through the map's entry API, which holds the
/// shard lock for the alias, so concurrent saves of one alias cannot both
/// succeed. Ids come from a counter that only ever grows.
#[derive(Debug, Default)]
pub struct MemoryAliasRepository {
    records: DashMap<String, AliasRecord>,
    last_id: AtomicI64,
}

impl MemoryAliasRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn save_url(&self, target_url: &str, alias: &str) -> Result<i64, StoreError> {
        if alias.is_empty() {
            return Err(StoreError::InvalidAlias);
        }

        match self.records.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AliasExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                slot.insert(AliasRecord::new(id, alias, target_url));
                Ok(id)
            }
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        self.records
            .get(alias)
            .map(|record| record.target_url.clone())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn delete_url(&self, alias: &str) -> Result<String, StoreError> {
        self.records
            .remove(alias)
            .map(|(_, record)| record.target_url)
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
