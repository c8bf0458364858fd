//! # Export Error Types
//!
//! ## Where Errors Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  render / archive / sink error                                          │
//! │       │                                                                 │
//! │       ├── single download      → ExportError returned to the caller     │
//! │       ├── zip batch            → failed document skipped, logged        │
//! │       ├── download_all         → falls back to per-document files       │
//! │       ├── print                → viewer stays open, warning logged      │
//! │       └── capture              → logged, returns None                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Document rendering and export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system failure (sink directory, spool file, font file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive could not be written.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Image decode or encode failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// printpdf rejected the document.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// A configured font could not be loaded.
    #[error("Font '{path}' could not be loaded: {reason}")]
    Font { path: PathBuf, reason: String },

    /// The seal image reference could not be resolved.
    #[error("Seal image unavailable: {0}")]
    Seal(String),

    /// A print command failed or is not configured.
    #[error("Print failed: {0}")]
    Print(String),

    /// Snapshot rasterization failed.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Nothing to export.
    #[error("Nothing to export: {0}")]
    Empty(String),
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
