//! # Zip Packaging
//!
//! Builds in-memory zip archives for batch downloads and the OOXML
//! spreadsheet container.
//!
//! Entry names are unique within an archive: a repeated name gets a
//! ` (2)`, ` (3)` suffix before its extension. [`UniqueNames`] applies the
//! same rule to batches saved as separate files.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportResult;

/// Hands out names that have not been used yet in one batch.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        UniqueNames::default()
    }

    /// `name` itself the first time, then `stem (2).ext`, `stem (3).ext`...
    pub fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }

        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => name.split_at(dot),
            _ => (name, ""),
        };

        (2u32..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| self.taken.insert(candidate.clone()))
            .unwrap_or_else(|| name.to_string())
    }
}

/// Accumulates zip entries in memory.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: UniqueNames,
    entries: usize,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        ArchiveBuilder::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        ArchiveBuilder {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: UniqueNames::new(),
            entries: 0,
        }
    }

    /// Adds a deflated entry; returns the name actually used.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> ExportResult<String> {
        let unique = self.names.claim(name);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        self.writer.start_file(unique.as_str(), options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;

        Ok(unique)
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Finalizes the archive and returns its bytes.
    pub fn finish(self) -> ExportResult<Vec<u8>> {
        let entries = self.entries;
        let cursor = self.writer.finish()?;
        let bytes = cursor.into_inner();
        debug!(entries, bytes = bytes.len(), "Archive finished");
        Ok(bytes)
    }

}
