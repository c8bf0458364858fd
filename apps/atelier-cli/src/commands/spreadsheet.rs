//! # Spreadsheet Command
//!
//! `atelier spreadsheet --records FILE` writes the filtered records to
//! `작업현황_{YYYY-MM-DD}.xlsx`. An empty selection still produces a
//! header-only workbook, like the admin screen's download button.

use clap::Args;
use std::path::PathBuf;

use super::Report;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::filter::{load_records, RecordFilter};

#[derive(Debug, Clone, Default, Args)]
pub struct SpreadsheetArgs {
    /// JSON array of work-status records
    #[arg(long)]
    pub records: PathBuf,

    /// Only records of this partner (repeatable)
    #[arg(long = "partner")]
    pub partners: Vec<String>,

    /// Only records with this status
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub from: Option<String>,

    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub month: Option<String>,

    /// Output file name override
    #[arg(long)]
    pub output: Option<String>,
}

pub async fn run(ctx: &AppContext, args: &SpreadsheetArgs) -> CliResult<Report> {
    let records = load_records(&args.records, &ctx.config.status_labels).await?;
    let filter = RecordFilter::from_flags(
        &args.partners,
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.month.as_deref(),
        &ctx.config.status_labels,
    )?;
    let selection = filter.apply(&records);

    let saved = ctx
        .spreadsheet_exporter()
        .export(&selection, args.output.as_deref())
        .await?;

    Ok(Report::new(format!("Exported {} work-status row(s)", selection.len())).with_file(&saved))
}
