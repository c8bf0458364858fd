//! # Capture Command
//!
//! `atelier capture` renders the filtered work-status view to a PNG.
//! Capture failures never abort: they are logged by the exporter and
//! reported here as "nothing saved".

use clap::Args;
use std::path::PathBuf;

use atelier_export::CaptureView;

use super::Report;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::filter::{capture_summary, load_records, RecordFilter};

#[derive(Debug, Clone, Default, Args)]
pub struct CaptureArgs {
    /// JSON array of work-status records
    #[arg(long)]
    pub records: PathBuf,

    /// Partner filter (`전체` for all)
    #[arg(long)]
    pub partner: Option<String>,

    /// Status filter (`전체` for all)
    #[arg(long)]
    pub status: Option<String>,

    /// Receive date on or after YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Receive date on or before YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Receive month YYYY-MM
    #[arg(long)]
    pub month: Option<String>,
}

pub async fn run(ctx: &AppContext, args: &CaptureArgs) -> CliResult<Report> {
    let records = load_records(&args.records, &ctx.config.status_labels).await?;
    let partners: Vec<String> = args.partner.iter().cloned().collect();
    let filter = RecordFilter::from_flags(
        &partners,
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.month.as_deref(),
        &ctx.config.status_labels,
    )?;
    let selection = filter.apply(&records);

    let summary = capture_summary(
        args.partner.as_deref(),
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.month.as_deref(),
    );
    let lines = summary.lines().to_vec();
    let view = CaptureView::from_records(&selection, summary);

    let saved = ctx
        .capture_exporter()
        .capture(Some(&view), args.partner.as_deref(), args.status.as_deref())
        .await;

    let report = match saved {
        Some(saved) => Report::new(format!("Captured {} work-status row(s)", selection.len()))
            .with_file(&saved),
        None => Report::new("Capture failed; nothing was saved"),
    };
    Ok(report.with_lines(lines))
}
