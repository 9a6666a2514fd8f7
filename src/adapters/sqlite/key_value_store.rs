//! SQLite implementation of the KeyValueStore.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::ports::KeyValueStore;

/// Persistent key-value store surviving app restarts.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        sqlx::query(
            r"INSERT INTO kv_store (key, value, updated_at)
              VALUES (?, ?, datetime('now'))
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_store() -> SqliteKeyValueStore {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteKeyValueStore::new(pool)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_store().await;
        assert!(store.get("currentBadge").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_store().await;
        store.set("token", "first").await.unwrap();
        store.set("token", "second").await.unwrap();
        assert_eq!(store.get("token").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = setup_store().await;
        store.set("token", "value").await.unwrap();
        store.remove("token").await.unwrap();
        store.remove("token").await.unwrap();
        assert!(store.get("token").await.unwrap().is_none());
    }
}
