//! # File Sinks
//!
//! Where finished artifacts go. In the browser this was a download
//! trigger; here it is a trait so exporters can be tested without touching
//! the file system.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::ExportResult;

/// A delivered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub file_name: String,
    /// Full path when the sink writes to disk.
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

/// Destination for exported files.
#[async_trait]
pub trait FileSink: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> ExportResult<SavedFile>;
}

// =============================================================================
// Directory Sink
// =============================================================================

/// Writes files into one output directory, creating it on first use.
///
/// An existing file with the same name is overwritten, like a repeated
/// browser download into a folder that auto-replaces.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> ExportResult<SavedFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "File saved");

        Ok(SavedFile {
            file_name: file_name.to_string(),
            path: Some(path),
            bytes: bytes.len(),
        })
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Collects files in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Snapshot of everything saved so far.
    pub async fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.lock().await.clone()
    }

    /// Names of everything saved so far.
    pub async fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Bytes of the last file saved under `file_name`.
    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .await
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl FileSink for MemorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> ExportResult<SavedFile> {
        self.files
            .lock()
            .await
            .push((file_name.to_string(), bytes.to_vec()));

        Ok(SavedFile {
            file_name: file_name.to_string(),
            path: None,
            bytes: bytes.len(),
        })
    }
}
