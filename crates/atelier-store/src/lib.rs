//! # atelier-store: Record Store for the Atelier Back-Office
//!
//! Persists the partner registry and the operator's company profile, the
//! two record kinds every generated document reads.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Data Flow                                │
//! │                                                                         │
//! │  atelier-cli (statements / partners / company commands)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  atelier-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  RecordStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ sanitize/read │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │◄───│ validate/save │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (kv_store: "partners", "companyInfo")                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQL access to the key-value table
//! - [`record_store`] - The `RecordStore` trait and its backends
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_store::{Database, RecordStore, StoreConfig};
//!
//! let db = Database::open(StoreConfig::new("atelier.db")).await?;
//! let store = db.records();
//! let partners = store.load_partners().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod record_store;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, StoreConfig};
pub use record_store::{
    KeyValueStore, KvRecordStore, MemoryKv, MemoryRecordStore, RecordStore, SqliteRecordStore,
};
pub use repository::kv::KvRepository;
