//! # atelier-export: Document Rendering and Export
//!
//! Turns built documents and work-status records into files: PDF
//! statements and quotes, zip batches, `.xlsx` spreadsheets and PNG
//! snapshots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Export Pipelines                                │
//! │                                                                         │
//! │  atelier-core                                                           │
//! │    FinancialDocument ─┐    WorkStatusRecord[] ─┐                        │
//! │                       ▼                        │                        │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │                 atelier-export (THIS CRATE)                    │    │
//! │  │                                                                │    │
//! │  │  layout ──► pdf ──► statement (single / zip / each / print)    │    │
//! │  │  spreadsheet ──► archive (OOXML zip)                           │    │
//! │  │  capture::view ──► capture::raster ──► PNG                     │    │
//! │  └──────────────────────────────┬─────────────────────────────────┘    │
//! │                                 ▼                                       │
//! │                   FileSink (DirectorySink / MemorySink)                 │
//! │                   PrintSurface (CommandPrintSurface)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`layout`] - Page layout shared by every PDF pathway
//! - [`pdf`] - printpdf renderer, fonts, seal image
//! - [`statement`] - Document downloads, zip batches, printing
//! - [`archive`] - In-memory zip builder
//! - [`spreadsheet`] - Work-status `.xlsx` export
//! - [`capture`] - Work-status PNG snapshot
//! - [`print`] - Print surfaces and settle strategy
//! - [`sink`] - Output destinations
//! - [`error`] - Export error types

pub mod archive;
pub mod capture;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod print;
pub mod sink;
pub mod spreadsheet;
pub mod statement;

pub use capture::{CaptureExporter, CaptureFont, CaptureOptions, CaptureView, FilterSummary};
pub use error::{ExportError, ExportResult};
pub use layout::{layout_document, PageLayout};
pub use pdf::{FontConfig, PdfRenderer};
pub use print::{
    CommandPrintSurface, PrintOutcome, PrintSurface, RecordingPrintSurface, SettleStrategy,
};
pub use sink::{DirectorySink, FileSink, MemorySink, SavedFile};
pub use spreadsheet::SpreadsheetExporter;
pub use statement::{DocumentExporter, ExportLabels, ExportOutcome};
