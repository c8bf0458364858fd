//! # Database Pool
//!
//! Opens the SQLite file behind the record store.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::new(path)          ← from [storage] db_path               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await    ← parent dir, pool, pending migrations │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.records()                    ← SqliteRecordStore (RecordStore)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store holds two rows, so the pool stays small. WAL journaling lets
//! an export read the partner list while a settings save is in flight.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::record_store::SqliteRecordStore;
use crate::repository::kv::KvRepository;

/// Where and how to open the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file, or `None` for a private in-memory database.
    pub path: Option<PathBuf>,
    pub pool_size: u32,
    /// How long a writer waits on a locked database.
    pub busy_timeout: Duration,
    pub migrate: bool,
}

impl StoreConfig {
    /// File-backed store; the file and its directory are created on open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: Some(path.into()),
            pool_size: 2,
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    /// Throwaway store for tests. One connection, since every in-memory
    /// connection would otherwise see its own empty database.
    pub fn in_memory() -> Self {
        StoreConfig {
            path: None,
            pool_size: 1,
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    pub fn migrate(mut self, migrate: bool) -> Self {
        self.migrate = migrate;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = match &self.path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            None => SqliteConnectOptions::new().in_memory(true),
        };
        options
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout)
    }
}

/// Open record store database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database and applies pending migrations.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        if let Some(dir) = config.path.as_deref().and_then(|p| p.parent()) {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| StoreError::ConnectionFailed(format!("{}: {e}", dir.display())))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        match &config.path {
            Some(path) => info!(path = %path.display(), "Record store opened"),
            None => debug!("In-memory record store opened"),
        }

        let db = Database { pool };
        if config.migrate {
            migrations::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Raw key-value access.
    pub fn kv(&self) -> KvRepository {
        KvRepository::new(self.pool.clone())
    }

    /// Partner/company record store over this database.
    pub fn records(&self) -> SqliteRecordStore {
        SqliteRecordStore::new(self.kv())
    }
}
