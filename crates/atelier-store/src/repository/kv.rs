//! # Key-Value Repository
//!
//! SQL access to the `kv_store` table.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────┬──────────────────────┐
//! │ key          │ value (JSON text)                │ updated_at (RFC3339) │
//! ├──────────────┼──────────────────────────────────┼──────────────────────┤
//! │ partners     │ [{"id":"1","name":"B파트너",...}] │ 2025-09-16T09:00:00Z │
//! │ companyInfo  │ {"companyName":"우리회사",...}     │ 2025-09-16T09:00:00Z │
//! └──────────────┴──────────────────────────────────┴──────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::record_store::KeyValueStore;

/// Repository for the `kv_store` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Lists stored keys in alphabetical order.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for KvRepository {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "kv set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
