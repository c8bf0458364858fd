//! # Atelier Back-Office CLI
//!
//! Command-line front end for document generation and work-status export.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse Arguments ──────────────────────────────────────────────────► │
//! │     • clap derive, one subcommand per export pathway                    │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,atelier=debug,sqlx=warn; RUST_LOG overrides        │
//! │                                                                         │
//! │  3. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → atelier.toml → ATELIER_* environment                   │
//! │                                                                         │
//! │  4. Open Record Store ────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  5. Run Command ──────────────────────────────────────────────────────► │
//! │     • statements / spreadsheet / capture / partners / company           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::capture::CaptureArgs;
use commands::company::CompanyCommand;
use commands::partners::PartnersCommand;
use commands::spreadsheet::SpreadsheetArgs;
use commands::statements::StatementsArgs;
use commands::Report;
use config::AppConfig;
use context::AppContext;
use error::CliResult;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,atelier=debug,sqlx=warn";

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Atelier back-office documents and exports")]
pub struct Cli {
    /// Config file (default: platform config dir / atelier.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build transaction statements (or quotes) per partner and export them
    Statements(StatementsArgs),

    /// Export work-status records as an .xlsx spreadsheet
    Spreadsheet(SpreadsheetArgs),

    /// Save a PNG snapshot of the work-status view
    Capture(CaptureArgs),

    /// Manage the partner registry
    #[command(subcommand)]
    Partners(PartnersCommand),

    /// Manage the company profile
    #[command(subcommand)]
    Company(CompanyCommand),
}

/// Loads configuration, opens the store and runs one command.
pub async fn run(cli: &Cli) -> CliResult<Report> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let ctx = AppContext::open(config).await?;
    execute(&ctx, &cli.command).await
}

/// Dispatches a parsed command.
pub async fn execute(ctx: &AppContext, command: &Command) -> CliResult<Report> {
    match command {
        Command::Statements(args) => commands::statements::run(ctx, args).await,
        Command::Spreadsheet(args) => commands::spreadsheet::run(ctx, args).await,
        Command::Capture(args) => commands::capture::run(ctx, args).await,
        Command::Partners(command) => commands::partners::run(ctx, command).await,
        Command::Company(command) => commands::company::run(ctx, command).await,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atelier_export=trace` - Trace one crate
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting atelier");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::memory_context;

    #[test]
    fn test_parse_statements() {
        let cli = Cli::try_parse_from([
            "atelier",
            "statements",
            "--records",
            "records.json",
            "--partner",
            "A",
            "--partner",
            "B",
            "--zip",
        ])
        .unwrap();

        match cli.command {
            Command::Statements(args) => {
                assert_eq!(args.partners, ["A", "B"]);
                assert!(args.zip);
                assert!(!args.quote);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_zip_conflicts_with_print() {
        let result = Cli::try_parse_from([
            "atelier",
            "statements",
            "--records",
            "r.json",
            "--zip",
            "--print",
            "A",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "atelier",
            "partners",
            "import",
            "partners.json",
            "--config",
            "atelier.toml",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("atelier.toml")));
        assert!(matches!(
            cli.command,
            Command::Partners(PartnersCommand::Import { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_dispatch() {
        let (ctx, _sink) = memory_context();
        let report = execute(&ctx, &Command::Company(CompanyCommand::Show))
            .await
            .unwrap();
        assert_eq!(report.message, "우리회사");
    }

    #[tokio::test]
    async fn test_open_sqlite_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.db_path = Some(dir.path().join("data").join("atelier.db"));
        config.export.output_dir = dir.path().join("out");

        let ctx = AppContext::open(config).await.unwrap();
        let report = execute(&ctx, &Command::Partners(PartnersCommand::List))
            .await
            .unwrap();
        assert_eq!(report.message, "3 partner(s)");
        assert!(dir.path().join("data").join("atelier.db").exists());
    }
}
