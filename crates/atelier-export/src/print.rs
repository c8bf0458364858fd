//! # Print Surface
//!
//! Opens a rendered PDF for viewing and sends it to the printer.
//!
//! ## Print Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PDF bytes                                                              │
//! │     │                                                                   │
//! │     ▼  surface.open(file_name, bytes)   ── failure → ExportError        │
//! │  PrintWindow (viewer visible)                                           │
//! │     │                                                                   │
//! │     ▼  settle: FixedDelay(800ms) │ OnLoad (window.wait_loaded)          │
//! │     │                                                                   │
//! │     ▼  window.print()                                                   │
//! │     ├── Ok  → PrintOutcome::Printed                                     │
//! │     └── Err → PrintOutcome::ViewerOnly + warn!  (viewer stays open)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The settle wait is neither cancellable nor retried.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ExportError, ExportResult};

/// Delay used when a surface cannot report that it finished loading.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(800);

/// How long to wait between opening a document and printing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStrategy {
    FixedDelay(Duration),
    /// Wait for the window to report it has loaded.
    OnLoad,
}

impl Default for SettleStrategy {
    fn default() -> Self {
        SettleStrategy::FixedDelay(DEFAULT_SETTLE)
    }
}

/// What happened to a print request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed { file_name: String },
    /// Opened for viewing but printing failed; the user can print by hand.
    ViewerOnly { file_name: String, reason: String },
}

/// A place that can show a PDF and print it.
#[async_trait]
pub trait PrintSurface: Send + Sync {
    async fn open(&self, file_name: &str, bytes: &[u8]) -> ExportResult<Box<dyn PrintWindow>>;
}

/// An opened document.
#[async_trait]
pub trait PrintWindow: Send + Sync {
    /// Resolves once the document is ready to print.
    async fn wait_loaded(&self) -> ExportResult<()>;

    async fn print(&self) -> ExportResult<()>;
}

/// Opens, settles and prints. Only a failure to open is an error.
pub async fn print_with(
    surface: &dyn PrintSurface,
    settle: SettleStrategy,
    file_name: &str,
    bytes: &[u8],
) -> ExportResult<PrintOutcome> {
    let window = surface.open(file_name, bytes).await?;

    match settle {
        SettleStrategy::FixedDelay(delay) => tokio::time::sleep(delay).await,
        SettleStrategy::OnLoad => {
            if let Err(e) = window.wait_loaded().await {
                warn!(file = %file_name, error = %e, "Print window did not report loaded");
            }
        }
    }

    match window.print().await {
        Ok(()) => {
            info!(file = %file_name, "Document sent to printer");
            Ok(PrintOutcome::Printed {
                file_name: file_name.to_string(),
            })
        }
        Err(e) => {
            warn!(file = %file_name, error = %e, "Print failed, document left open in viewer");
            Ok(PrintOutcome::ViewerOnly {
                file_name: file_name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

// =============================================================================
// Command Surface
// =============================================================================

/// Spools the PDF to disk and drives external viewer/print commands.
///
/// Commands are split on whitespace. A `{file}` argument is replaced by the
/// spooled path; without one the path is appended.
///
/// ```text
/// viewer_command = "xdg-open"          → xdg-open /tmp/atelier/거래명세서.pdf
/// print_command  = "lp -d office {file}"
/// ```
#[derive(Debug, Clone)]
pub struct CommandPrintSurface {
    spool_dir: PathBuf,
    viewer_command: Option<String>,
    print_command: Option<String>,
}

impl CommandPrintSurface {
    pub fn new(spool_dir: impl Into<PathBuf>) -> Self {
        CommandPrintSurface {
            spool_dir: spool_dir.into(),
            viewer_command: None,
            print_command: None,
        }
    }

    pub fn viewer_command(mut self, command: Option<String>) -> Self {
        self.viewer_command = command.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn print_command(mut self, command: Option<String>) -> Self {
        self.print_command = command.filter(|c| !c.trim().is_empty());
        self
    }
}

#[async_trait]
impl PrintSurface for CommandPrintSurface {
    async fn open(&self, file_name: &str, bytes: &[u8]) -> ExportResult<Box<dyn PrintWindow>> {
        tokio::fs::create_dir_all(&self.spool_dir).await?;
        let path = self.spool_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "Spooled document for printing");

        if let Some(viewer) = &self.viewer_command {
            let spawned = build_command(viewer, &path)
                .and_then(|mut command| command.spawn().map_err(ExportError::from));
            match spawned {
                Ok(mut child) => {
                    info!(path = %path.display(), "Opened document in viewer");
                    tokio::spawn(async move {
                        if let Err(e) = child.wait().await {
                            warn!(error = %e, "Lost track of the viewer process");
                        }
                    });
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Viewer could not be opened, printing the spooled file anyway"
                    );
                }
            }
        }

        Ok(Box::new(CommandPrintWindow {
            path,
            print_command: self.print_command.clone(),
        }))
    }
}

struct CommandPrintWindow {
    path: PathBuf,
    print_command: Option<String>,
}

#[async_trait]
impl PrintWindow for CommandPrintWindow {
    async fn wait_loaded(&self) -> ExportResult<()> {
        // the file is complete once spooled
        Ok(())
    }

    async fn print(&self) -> ExportResult<()> {
        let Some(print) = &self.print_command else {
            return Err(ExportError::Print("no print command configured".to_string()));
        };

        let status = build_command(print, &self.path)?.status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ExportError::Print(format!("print command exited with {status}")))
        }
    }
}

fn build_command(template: &str, path: &Path) -> ExportResult<Command> {
    let mut parts = template.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ExportError::Print("empty command".to_string()))?;

    let file = path.to_string_lossy();
    let mut args: Vec<String> = parts.map(|p| p.replace("{file}", &file)).collect();
    if !template.contains("{file}") {
        args.push(file.into_owned());
    }

    let mut command = Command::new(program);
    command.args(args);
    Ok(command)
}

// =============================================================================
// Recording Surface
// =============================================================================

/// What a [`RecordingPrintSurface`] saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintLog {
    pub opened: Vec<String>,
    pub printed: Vec<String>,
    pub load_waits: usize,
}

/// In-memory surface for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrintSurface {
    log: Arc<Mutex<PrintLog>>,
    fail_print: bool,
}

impl RecordingPrintSurface {
    pub fn new() -> Self {
        RecordingPrintSurface::default()
    }

    /// Surface whose windows refuse to print.
    pub fn failing() -> Self {
        RecordingPrintSurface {
            fail_print: true,
            ..Default::default()
        }
    }

    pub async fn log(&self) -> PrintLog {
        self.log.lock().await.clone()
    }
}

#[async_trait]
impl PrintSurface for RecordingPrintSurface {
    async fn open(&self, file_name: &str, _bytes: &[u8]) -> ExportResult<Box<dyn PrintWindow>> {
        self.log.lock().await.opened.push(file_name.to_string());
        Ok(Box::new(RecordingWindow {
            file_name: file_name.to_string(),
            log: Arc::clone(&self.log),
            fail_print: self.fail_print,
        }))
    }
}

struct RecordingWindow {
    file_name: String,
    log: Arc<Mutex<PrintLog>>,
    fail_print: bool,
}

#[async_trait]
impl PrintWindow for RecordingWindow {
    async fn wait_loaded(&self) -> ExportResult<()> {
        self.log.lock().await.load_waits += 1;
        Ok(())
    }

    async fn print(&self) -> ExportResult<()> {
        if self.fail_print {
            return Err(ExportError::Print("printer unavailable".to_string()));
        }
        self.log.lock().await.printed.push(self.file_name.clone());
        Ok(())
    }
}
