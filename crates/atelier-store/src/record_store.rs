//! # Record Store
//!
//! The `RecordStore` trait is the seam between the document pipeline and
//! wherever partner and company profiles live.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RecordStore (load/save partners, load/save company info)               │
//! │       │  sanitize on read, validate on write                            │
//! │       ▼                                                                 │
//! │  KvRecordStore<K: KeyValueStore>                                        │
//! │       │                                                                 │
//! │       ├── KvRepository   → SQLite kv_store table   (SqliteRecordStore)  │
//! │       └── MemoryKv       → RwLock<HashMap>         (MemoryRecordStore)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Fallbacks
//! | Stored value            | Result                                  |
//! |-------------------------|-----------------------------------------|
//! | key missing             | seeded defaults                         |
//! | not valid JSON          | seeded defaults + `warn!`               |
//! | partners not an array   | seeded partners                         |
//! | partially filled        | blank fields filled from the defaults   |
//!
//! Database failures are still errors.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use atelier_core::sanitize::{
    default_partners, sanitize_company_info, sanitize_partners, COMPANY_INFO_KEY, PARTNERS_KEY,
};
use atelier_core::validation::validate_partner_set;
use atelier_core::{partners_to_lookup, CompanyInfo, PartnerLookup, PartnerRecord};

use crate::error::StoreResult;
use crate::repository::kv::KvRepository;

// =============================================================================
// Traits
// =============================================================================

/// Raw string storage under string keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Returns true if the key existed.
    async fn remove(&self, key: &str) -> StoreResult<bool>;
}

/// Partner registry and company profile persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads the partner list, sanitized. Never empty on a fresh store.
    async fn load_partners(&self) -> StoreResult<Vec<PartnerRecord>>;

    /// Validates and saves the partner list.
    async fn save_partners(&self, partners: &[PartnerRecord]) -> StoreResult<()>;

    /// Loads the company profile, sanitized.
    async fn load_company_info(&self) -> StoreResult<CompanyInfo>;

    /// Saves the company profile.
    async fn save_company_info(&self, info: &CompanyInfo) -> StoreResult<()>;

    /// Loads partners indexed by display name.
    async fn load_partner_lookup(&self) -> StoreResult<PartnerLookup> {
        let partners = self.load_partners().await?;
        Ok(partners_to_lookup(&partners))
    }
}

// =============================================================================
// Key-Value Record Store
// =============================================================================

/// [`RecordStore`] over any [`KeyValueStore`].
#[derive(Debug)]
pub struct KvRecordStore<K> {
    kv: K,
}

/// Record store persisted in SQLite.
pub type SqliteRecordStore = KvRecordStore<KvRepository>;

/// Record store held in process memory.
pub type MemoryRecordStore = KvRecordStore<MemoryKv>;

impl<K: KeyValueStore> KvRecordStore<K> {
    pub fn new(kv: K) -> Self {
        KvRecordStore { kv }
    }

    /// Access to the underlying key-value backend.
    pub fn kv(&self) -> &K {
        &self.kv
    }
}

impl MemoryRecordStore {
    /// Creates an empty in-memory store.
    pub fn in_memory() -> Self {
        KvRecordStore::new(MemoryKv::default())
    }
}

#[async_trait]
impl<K: KeyValueStore> RecordStore for KvRecordStore<K> {
    async fn load_partners(&self) -> StoreResult<Vec<PartnerRecord>> {
        let Some(stored) = self.kv.get(PARTNERS_KEY).await? else {
            return Ok(default_partners());
        };

        let parsed: serde_json::Value = match serde_json::from_str(&stored) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse stored partners, using defaults");
                return Ok(default_partners());
            }
        };

        Ok(sanitize_partners(&parsed).unwrap_or_else(default_partners))
    }

    async fn save_partners(&self, partners: &[PartnerRecord]) -> StoreResult<()> {
        validate_partner_set(partners)?;

        let json = serde_json::to_string(partners)?;
        self.kv.set(PARTNERS_KEY, &json).await?;

        info!(count = partners.len(), "Partners saved");
        Ok(())
    }

    async fn load_company_info(&self) -> StoreResult<CompanyInfo> {
        let Some(stored) = self.kv.get(COMPANY_INFO_KEY).await? else {
            return Ok(CompanyInfo::default());
        };

        match serde_json::from_str::<serde_json::Value>(&stored) {
            Ok(value) => Ok(sanitize_company_info(&value)),
            Err(e) => {
                warn!(error = %e, "Failed to parse stored company info, using defaults");
                Ok(CompanyInfo::default())
            }
        }
    }

    async fn save_company_info(&self, info: &CompanyInfo) -> StoreResult<()> {
        let json = serde_json::to_string(info)?;
        self.kv.set(COMPANY_INFO_KEY, &json).await?;

        info!(company = %info.company_name, "Company info saved");
        Ok(())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Key-value backend held in a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
