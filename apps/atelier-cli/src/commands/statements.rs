//! # Statement & Quote Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    atelier statements                                   │
//! │                                                                         │
//! │  records.json ──► RecordFilter ──► selection (non-empty)                │
//! │                                        │                                │
//! │        RecordStore ──► company info ───┤                                │
//! │                   └──► partner lookup ─┤ (statements only)              │
//! │                                        ▼                                │
//! │                  build_statements_by_partner / build_quotes_by_partner  │
//! │                                        │                                │
//! │          ┌──────────────┬──────────────┼────────────────┐               │
//! │          ▼              ▼              ▼                ▼               │
//! │      (default)        --zip          --each        --print NAME         │
//! │   1 doc: PDF       zip archive    PDF per doc      print one doc        │
//! │   n docs: zip,                                                          │
//! │   fallback each                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use atelier_core::{
    build_quotes_by_partner, build_statements_by_partner, DocumentKind, FinancialDocument, Party,
};
use atelier_export::{ExportOutcome, PrintOutcome, PrintSurface};

use super::Report;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::filter::{load_records, RecordFilter};

#[derive(Debug, Clone, Default, Args)]
pub struct StatementsArgs {
    /// JSON array of work-status records
    #[arg(long)]
    pub records: PathBuf,

    /// Only records of this partner (repeatable)
    #[arg(long = "partner")]
    pub partners: Vec<String>,

    /// Only records with this status
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

    /// Only these record ids (repeatable)
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Build quotes instead of transaction statements
    #[arg(long)]
    pub quote: bool,

    /// File-name label override
    #[arg(long)]
    pub label: Option<String>,

    /// Always package into one zip archive
    #[arg(long, conflicts_with_all = ["each", "print"])]
    pub zip: bool,

    /// Always save one PDF per document
    #[arg(long, conflicts_with = "print")]
    pub each: bool,

    /// Print the document for this partner instead of saving
    #[arg(long, value_name = "PARTNER")]
    pub print: Option<String>,
}

impl StatementsArgs {
    fn kind(&self) -> DocumentKind {
        if self.quote {
            DocumentKind::Quote
        } else {
            DocumentKind::Statement
        }
    }

    fn delivery(&self) -> Delivery<'_> {
        match (&self.print, self.zip, self.each) {
            (Some(partner), _, _) => Delivery::Print(partner),
            (None, true, _) => Delivery::Zip,
            (None, false, true) => Delivery::Each,
            (None, false, false) => Delivery::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery<'a> {
    Auto,
    Zip,
    Each,
    Print(&'a str),
}

/// Runs `atelier statements` with the configured printer.
pub async fn run(ctx: &AppContext, args: &StatementsArgs) -> CliResult<Report> {
    let surface = ctx.print_surface();
    execute(ctx, args, &surface).await
}

/// Runs `atelier statements` against an explicit print surface.
pub async fn execute(
    ctx: &AppContext,
    args: &StatementsArgs,
    surface: &dyn PrintSurface,
) -> CliResult<Report> {
    let records = load_records(&args.records, &ctx.config.status_labels).await?;
    let filter = RecordFilter::from_flags(
        &args.partners,
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.month.as_deref(),
        &ctx.config.status_labels,
    )?
    .with_ids(args.ids.clone());

    let selection = filter.apply(&records);
    let kind = args.kind();
    if selection.is_empty() {
        return Err(CliError::invalid_input(format!(
            "{}를 생성할 항목을 선택해주세요.",
            kind.title()
        )));
    }

    let supplier = ctx.store.load_company_info().await?;
    match kind {
        DocumentKind::Statement => {
            let lookup = ctx.store.load_partner_lookup().await?;
            let docs =
                build_statements_by_partner(&selection, &supplier, &lookup, ctx.clock.as_ref());
            deliver(ctx, &docs, args, surface).await
        }
        DocumentKind::Quote => {
            let docs = build_quotes_by_partner(&selection, &supplier, ctx.clock.as_ref());
            deliver(ctx, &docs, args, surface).await
        }
    }
}

async fn deliver<B: Party + Sync>(
    ctx: &AppContext,
    docs: &[FinancialDocument<B>],
    args: &StatementsArgs,
    surface: &dyn PrintSurface,
) -> CliResult<Report> {
    let exporter = ctx.document_exporter();
    let label = args.label.as_deref();
    let title = args.kind().title();
    let summary = docs.iter().map(summary_line).collect::<Vec<_>>();

    info!(kind = title, documents = docs.len(), delivery = ?args.delivery(), "Delivering documents");

    let report = match args.delivery() {
        Delivery::Print(partner) => {
            let doc = docs
                .iter()
                .find(|doc| doc.buyer_name() == partner.trim())
                .ok_or_else(|| {
                    CliError::invalid_input(format!("No {title} for partner '{partner}' in the selection"))
                })?;

            match exporter.print_document(doc, surface).await? {
                PrintOutcome::Printed { file_name } => Report::new(format!("Printed {file_name}")),
                PrintOutcome::ViewerOnly { file_name, reason } => {
                    warn!(file = %file_name, reason = %reason, "Document opened but not printed");
                    Report::new(format!("Opened {file_name} for viewing; printing failed: {reason}"))
                }
            }
        }
        Delivery::Zip => {
            let saved = exporter.download_documents_zip(docs, label).await?;
            Report::new(format!("Saved {} {title}(s) in one archive", docs.len())).with_file(&saved)
        }
        Delivery::Each => {
            let saved = exporter.download_documents_each(docs, label).await;
            if saved.is_empty() {
                return Err(CliError::internal(format!("No {title} could be saved")));
            }
            Report::new(format!("Saved {} of {} {title}(s)", saved.len(), docs.len()))
                .with_files(&saved)
        }
        Delivery::Auto if docs.len() == 1 => {
            let saved = exporter.download_document(&docs[0], label).await?;
            Report::new(format!("Saved {title}")).with_file(&saved)
        }
        Delivery::Auto => match exporter.download_all(docs, label).await {
            ExportOutcome::Archive(saved) => {
                Report::new(format!("Saved {} {title}(s) in one archive", docs.len())).with_file(&saved)
            }
            ExportOutcome::Individual(saved) => Report::new(format!(
                "Archive failed; saved {} {title}(s) individually",
                saved.len()
            ))
            .with_files(&saved),
            ExportOutcome::Nothing => {
                return Err(CliError::internal(format!("No {title} could be saved")));
            }
        },
    };

    Ok(report.with_lines(summary))
}

/// `A파트너: 공급가액 4,000원 / 부가세 400원 / 합계금액 4,400원`
fn summary_line<B: Party>(doc: &FinancialDocument<B>) -> String {
    format!(
        "{}: 공급가액 {}원 / 부가세 {}원 / 합계금액 {}원",
        doc.buyer_name(),
        doc.total_amount.grouped(),
        doc.tax.grouped(),
        doc.final_amount.grouped()
    )
}
