//! SQLite implementation of the alias repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::repositories::{AliasRepository, StoreError};
use crate::utils::db_error::is_unique_violation_on_alias;

/// SQLite repository for alias storage and retrieval.
///
/// Uniqueness comes from the `UNIQUE` constraint on `url.alias`, so two
/// concurrent saves of the same alias are serialized by SQLite itself and
/// exactly one of them wins.
pub struct SqliteAliasRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AliasRepository for SqliteAliasRepository {
    async fn save_url(&self, target_url: &str, alias: &str) -> Result<i64, StoreError> {
        if alias.is_empty() {
            return Err(StoreError::InvalidAlias);
        }

        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url (target_url, alias)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(target_url)
        .bind(alias)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(e) if is_unique_violation_on_alias(&e) => {
                Err(StoreError::AliasExists(alias.to_string()))
            }
            Err(e) => Err(StoreError::unavailable(e)),
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT target_url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(StoreError::unavailable)?
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn delete_url(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM url
            WHERE alias = ?
            RETURNING target_url
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(StoreError::unavailable)?
        .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(StoreError::unavailable)?;

        Ok(())
    }
}
