//! # Application Context
//!
//! Everything a command needs, built once at startup.
//!
//! ```text
//! AppContext
//! ├── config  AppConfig              (read-only after load)
//! ├── store   Arc<dyn RecordStore>   (SQLite, or memory in tests)
//! ├── sink    Arc<dyn FileSink>      (output directory, or memory in tests)
//! └── clock   Arc<dyn Clock>         (local wall clock, or fixed in tests)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use atelier_core::{Clock, SystemClock};
use atelier_export::{
    CaptureExporter, CaptureFont, CommandPrintSurface, DirectorySink, DocumentExporter, FileSink,
    PdfRenderer, SpreadsheetExporter,
};
use atelier_store::{Database, RecordStore, StoreConfig};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Spool directory name for documents sent to the printer.
const PRINT_SPOOL_DIR: &str = "atelier-print";

/// Shared state handed to every command.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
    pub sink: Arc<dyn FileSink>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        sink: Arc<dyn FileSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        AppContext {
            config,
            store,
            sink,
            clock,
        }
    }

    /// Opens the SQLite store and the output directory named by `config`.
    pub async fn open(config: AppConfig) -> CliResult<Self> {
        let db_path = config.db_path()?;
        let db = Database::open(StoreConfig::new(&db_path)).await?;
        info!(db = %db_path.display(), output = %config.export.output_dir.display(), "Record store ready");

        let sink = DirectorySink::new(config.export.output_dir.clone());
        Ok(AppContext::new(
            config,
            Arc::new(db.records()),
            Arc::new(sink),
            Arc::new(SystemClock),
        ))
    }

    pub fn renderer(&self) -> PdfRenderer {
        PdfRenderer::from_config(&self.config.font_config(), self.config.export.asset_dir.clone())
    }

    pub fn document_exporter(&self) -> DocumentExporter {
        DocumentExporter::new(self.renderer(), self.sink.clone(), self.clock.clone())
            .with_labels(self.config.export_labels())
            .with_settle(self.config.settle_strategy())
    }

    pub fn spreadsheet_exporter(&self) -> SpreadsheetExporter {
        SpreadsheetExporter::new(self.sink.clone(), self.clock.clone())
            .with_status_labels(self.config.status_labels.clone())
    }

    pub fn capture_exporter(&self) -> CaptureExporter {
        CaptureExporter::new(self.sink.clone(), self.clock.clone())
            .with_font(CaptureFont::from_config(&self.config.font_config()))
    }

    /// Printer backed by the configured viewer/print commands.
    pub fn print_surface(&self) -> CommandPrintSurface {
        CommandPrintSurface::new(spool_dir())
            .viewer_command(self.config.print.viewer_command.clone())
            .print_command(self.config.print.print_command.clone())
    }
}

fn spool_dir() -> PathBuf {
    std::env::temp_dir().join(PRINT_SPOOL_DIR)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Context wired to in-memory backends.

    use super::*;
    use atelier_core::FixedClock;
    use atelier_export::MemorySink;
    use atelier_store::MemoryRecordStore;

    pub fn memory_context() -> (AppContext, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let context = AppContext::new(
            AppConfig::default(),
            Arc::new(MemoryRecordStore::in_memory()),
            sink.clone(),
            Arc::new(FixedClock::ymd(2025, 9, 16)),
        );
        (context, sink)
    }
}
