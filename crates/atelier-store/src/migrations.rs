//! # Schema Migrations
//!
//! The store's schema ships inside the binary and is brought up to date on
//! every open.
//!
//! ```text
//! migrations/sqlite/
//!   001_initial_schema.sql     kv_store(key PRIMARY KEY, value, updated_at)
//!
//! open ──► MIGRATOR.run(pool) ──► _sqlx_migrations records version + checksum
//! ```
//!
//! Applied files are checksummed, so a change to a shipped file fails the
//! next open. Schema changes go in a new `NNN_*.sql` file.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StoreResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whatever embedded migrations the database has not seen yet.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying store migrations");
    MIGRATOR.run(pool).await?;
    info!("Store schema up to date");
    Ok(())
}

/// `(embedded, applied)` migration counts. A database that was never
/// migrated has no bookkeeping table and reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let applied = match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count.max(0) as usize,
        Err(sqlx::Error::Database(_)) => 0,
        Err(e) => return Err(e.into()),
    };
    Ok((MIGRATOR.migrations.len(), applied))
}
