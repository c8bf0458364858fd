//! # Document Exporter
//!
//! Delivers statements and quotes as PDF files: one at a time, bundled into
//! a zip, or sent to the printer.
//!
//! ## Delivery Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       DocumentExporter                                  │
//! │                                                                         │
//! │  download_document ──► render ──► sink  {label}_{buyer}_{date}.pdf      │
//! │                                                                         │
//! │  download_documents_zip ──► render each (sequential, input order)       │
//! │        │                     └─ failure: log + skip                     │
//! │        └──► ArchiveBuilder ──► sink  {batch}_{date}.zip                 │
//! │                                                                         │
//! │  download_all ──► zip ──fails──► download_documents_each                │
//! │                                   └─ repeated names get " (n)"          │
//! │                                                                         │
//! │  print_document ──► render ──► PrintSurface (settle, print)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The issue date in file names comes from the injected [`Clock`], so a
//! document built and exported under a fixed clock always gets the same name.

use std::sync::Arc;
use tracing::{error, info, warn};

use atelier_core::format::{batch_archive_name, document_file_name};
use atelier_core::{Clock, DocumentKind, FinancialDocument, Party};

use crate::archive::{ArchiveBuilder, UniqueNames};
use crate::error::{ExportError, ExportResult};
use crate::pdf::PdfRenderer;
use crate::print::{print_with, PrintOutcome, PrintSurface, SettleStrategy};
use crate::sink::{FileSink, SavedFile};

/// File-name labels per document kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLabels {
    pub statement: String,
    pub statement_batch: String,
    pub quote: String,
    pub quote_batch: String,
}

impl Default for ExportLabels {
    fn default() -> Self {
        ExportLabels {
            statement: DocumentKind::Statement.default_label().to_string(),
            statement_batch: DocumentKind::Statement.default_batch_label().to_string(),
            quote: DocumentKind::Quote.default_label().to_string(),
            quote_batch: DocumentKind::Quote.default_batch_label().to_string(),
        }
    }
}

impl ExportLabels {
    /// Label for a single document of `kind`.
    pub fn single(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Statement => &self.statement,
            DocumentKind::Quote => &self.quote,
        }
    }

    /// Label for a batch archive of `kind`.
    pub fn batch(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Statement => &self.statement_batch,
            DocumentKind::Quote => &self.quote_batch,
        }
    }
}

/// What [`DocumentExporter::download_all`] delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// One zip archive.
    Archive(SavedFile),
    /// The zip failed; these individual files were saved instead.
    Individual(Vec<SavedFile>),
    /// Nothing could be delivered.
    Nothing,
}

/// Renders documents and hands the bytes to a sink or printer.
pub struct DocumentExporter {
    renderer: PdfRenderer,
    sink: Arc<dyn FileSink>,
    clock: Arc<dyn Clock>,
    labels: ExportLabels,
    settle: SettleStrategy,
}

impl DocumentExporter {
    pub fn new(renderer: PdfRenderer, sink: Arc<dyn FileSink>, clock: Arc<dyn Clock>) -> Self {
        DocumentExporter {
            renderer,
            sink,
            clock,
            labels: ExportLabels::default(),
            settle: SettleStrategy::default(),
        }
    }

    pub fn with_labels(mut self, labels: ExportLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_settle(mut self, settle: SettleStrategy) -> Self {
        self.settle = settle;
        self
    }

    pub fn labels(&self) -> &ExportLabels {
        &self.labels
    }

    /// `{label}_{buyer}_{YYYY-MM-DD}.pdf`, label defaulting to the kind's.
    pub fn file_name_for<B: Party>(&self, doc: &FinancialDocument<B>, label: Option<&str>) -> String {
        let label = label.unwrap_or_else(|| self.labels.single(doc.kind));
        document_file_name(label, doc.buyer_name(), self.clock.today())
    }

    /// Renders one document and saves it as a PDF.
    pub async fn download_document<B: Party + Sync>(
        &self,
        doc: &FinancialDocument<B>,
        label: Option<&str>,
    ) -> ExportResult<SavedFile> {
        let file_name = self.file_name_for(doc, label);
        self.save_document(doc, &file_name).await
    }

    async fn save_document<B: Party + Sync>(
        &self,
        doc: &FinancialDocument<B>,
        file_name: &str,
    ) -> ExportResult<SavedFile> {
        let bytes = self.renderer.render(doc)?;
        let saved = self.sink.save(file_name, &bytes).await?;

        info!(file = %saved.file_name, buyer = %doc.buyer_name(), "Document downloaded");
        Ok(saved)
    }

    /// Renders every document into one zip archive.
    ///
    /// Documents render sequentially in input order. A document that fails
    /// to render is logged and left out; the rest are still packaged. If no
    /// document renders, nothing is saved and an error is returned.
    pub async fn download_documents_zip<B: Party + Sync>(
        &self,
        docs: &[FinancialDocument<B>],
        label: Option<&str>,
    ) -> ExportResult<SavedFile> {
        let Some(first) = docs.first() else {
            return Err(ExportError::Empty("no documents selected".to_string()));
        };
        let kind = first.kind;

        let mut archive = ArchiveBuilder::new();
        for doc in docs {
            match self.renderer.render(doc) {
                Ok(bytes) => {
                    let entry = self.file_name_for(doc, None);
                    archive.add(&entry, &bytes)?;
                }
                Err(e) => {
                    error!(buyer = %doc.buyer_name(), error = %e, "Failed to render document, skipping");
                }
            }
        }

        if archive.is_empty() {
            return Err(ExportError::Empty("no document could be rendered".to_string()));
        }

        let entries = archive.len();
        let bytes = archive.finish()?;
        let label = label.unwrap_or_else(|| self.labels.batch(kind));
        let archive_name = batch_archive_name(label, self.clock.today());
        let saved = self.sink.save(&archive_name, &bytes).await?;

        info!(
            file = %saved.file_name,
            documents = docs.len(),
            entries,
            "Document archive downloaded"
        );
        Ok(saved)
    }

    /// Saves each document as its own PDF. Failures are logged and skipped.
    ///
    /// Buyers whose names sanitize to the same file name get ` (2)`, ` (3)`
    /// suffixes, as zip entries do, so no file in the batch replaces another.
    pub async fn download_documents_each<B: Party + Sync>(
        &self,
        docs: &[FinancialDocument<B>],
        label: Option<&str>,
    ) -> Vec<SavedFile> {
        let mut names = UniqueNames::new();
        let mut saved = Vec::with_capacity(docs.len());
        for doc in docs {
            let file_name = names.claim(&self.file_name_for(doc, label));
            match self.save_document(doc, &file_name).await {
                Ok(file) => saved.push(file),
                Err(e) => {
                    error!(buyer = %doc.buyer_name(), error = %e, "Failed to download document");
                }
            }
        }
        saved
    }

    /// Zip first; on failure, one file per document. Never errors.
    ///
    /// `label` applies to the archive; individual fallback files use the
    /// single-document label.
    pub async fn download_all<B: Party + Sync>(
        &self,
        docs: &[FinancialDocument<B>],
        label: Option<&str>,
    ) -> ExportOutcome {
        if docs.is_empty() {
            return ExportOutcome::Nothing;
        }

        match self.download_documents_zip(docs, label).await {
            Ok(saved) => ExportOutcome::Archive(saved),
            Err(e) => {
                warn!(error = %e, "Zip export failed, saving documents individually");
                let files = self.download_documents_each(docs, None).await;
                if files.is_empty() {
                    ExportOutcome::Nothing
                } else {
                    ExportOutcome::Individual(files)
                }
            }
        }
    }

    /// Renders one document and prints it through `surface`.
    pub async fn print_document<B: Party + Sync>(
        &self,
        doc: &FinancialDocument<B>,
        surface: &dyn PrintSurface,
    ) -> ExportResult<PrintOutcome> {
        let bytes = self.renderer.render(doc)?;
        let file_name = self.file_name_for(doc, None);
        print_with(surface, self.settle, &file_name, &bytes).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::RecordingPrintSurface;
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use atelier_core::{
        build_quotes_by_partner, build_statements_by_partner, CompanyInfo, FixedClock,
        PartnerLookup, TransactionStatement, WorkStatusRecord,
    };
    use std::io::Cursor;
    use zip::ZipArchive;

    fn record(id: &str, partner: &str) -> WorkStatusRecord {
        let mut r = WorkStatusRecord::new(id, partner);
        r.style_no = format!("ST-{id}");
        r.unit_price = 1000;
        r.work_quantity = 2;
        r
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::ymd(2025, 9, 16))
    }

    fn statements(partners: &[&str]) -> Vec<TransactionStatement> {
        let records: Vec<_> = partners
            .iter()
            .enumerate()
            .map(|(i, p)| record(&i.to_string(), p))
            .collect();
        let mut info = CompanyInfo::default();
        info.seal_image = None;
        build_statements_by_partner(&records, &info, &PartnerLookup::new(), clock().as_ref())
    }

    fn exporter(sink: Arc<dyn FileSink>) -> DocumentExporter {
        DocumentExporter::new(PdfRenderer::builtin(), sink, clock())
            .with_settle(SettleStrategy::OnLoad)
    }

    struct FailingSink;

    #[async_trait]
    impl FileSink for FailingSink {
        async fn save(&self, file_name: &str, _bytes: &[u8]) -> ExportResult<SavedFile> {
            if file_name.ends_with(".zip") {
                return Err(ExportError::Io(std::io::Error::other("disk full")));
            }
            Ok(SavedFile {
                file_name: file_name.to_string(),
                path: None,
                bytes: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_download_document_name() {
        let sink = Arc::new(MemorySink::new());
        let exporter = exporter(sink.clone());
        let docs = statements(&["A파트너"]);

        let saved = exporter.download_document(&docs[0], None).await.unwrap();
        assert_eq!(saved.file_name, "거래명세서_A파트너_2025-09-16.pdf");

        let bytes = sink.get(&saved.file_name).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let custom = exporter.download_document(&docs[0], Some("명세")).await.unwrap();
        assert_eq!(custom.file_name, "명세_A파트너_2025-09-16.pdf");
    }

    #[tokio::test]
    async fn test_zip_has_one_entry_per_document() {
        let sink = Arc::new(MemorySink::new());
        let exporter = exporter(sink.clone());
        let docs = statements(&["A", "B", "C"]);

        let saved = exporter.download_documents_zip(&docs, None).await.unwrap();
        assert_eq!(saved.file_name, "거래명세서_일괄_2025-09-16.zip");

        let bytes = sink.get(&saved.file_name).await.unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(archive.len(), 3);
        for partner in ["A", "B", "C"] {
            let expected = format!("거래명세서_{partner}_2025-09-16.pdf");
            assert!(names.contains(&expected.as_str()), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn test_zip_quotes_use_quote_labels() {
        let sink = Arc::new(MemorySink::new());
        let exporter = exporter(sink.clone());
        let quotes = build_quotes_by_partner(
            &[record("1", "A")],
            &CompanyInfo::default(),
            clock().as_ref(),
        );

        let saved = exporter.download_documents_zip(&quotes, None).await.unwrap();
        assert_eq!(saved.file_name, "견적서_일괄_2025-09-16.zip");
    }

    #[tokio::test]
    async fn test_zip_rejects_empty_selection() {
        let exporter = exporter(Arc::new(MemorySink::new()));
        let docs: Vec<TransactionStatement> = Vec::new();
        assert!(matches!(
            exporter.download_documents_zip(&docs, None).await,
            Err(ExportError::Empty(_))
        ));
        assert_eq!(exporter.download_all(&docs, None).await, ExportOutcome::Nothing);
    }

    #[tokio::test]
    async fn test_download_all_falls_back_to_individual_files() {
        let exporter = exporter(Arc::new(FailingSink));
        let docs = statements(&["A", "B"]);

        match exporter.download_all(&docs, None).await {
            ExportOutcome::Individual(files) => {
                let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
                assert_eq!(
                    names,
                    vec!["거래명세서_A_2025-09-16.pdf", "거래명세서_B_2025-09-16.pdf"]
                );
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_each_keeps_colliding_names_apart() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(crate::sink::DirectorySink::new(dir.path()));
        let exporter = exporter(sink);
        let docs = statements(&["A/B", "A_B"]);

        let saved = exporter.download_documents_each(&docs, None).await;
        let names: Vec<&str> = saved.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            ["거래명세서_A_B_2025-09-16.pdf", "거래명세서_A_B_2025-09-16 (2).pdf"]
        );

        let on_disk = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(on_disk, 2);
    }

    #[tokio::test]
    async fn test_fallback_files_keep_colliding_names_apart() {
        let exporter = exporter(Arc::new(FailingSink));
        let docs = statements(&["A/B", "A_B"]);

        match exporter.download_all(&docs, None).await {
            ExportOutcome::Individual(files) => {
                assert_eq!(files[0].file_name, "거래명세서_A_B_2025-09-16.pdf");
                assert_eq!(files[1].file_name, "거래명세서_A_B_2025-09-16 (2).pdf");
            }
            other => panic!("expected individual files, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_download_all_prefers_archive() {
        let sink = Arc::new(MemorySink::new());
        let exporter = exporter(sink.clone());
        let outcome = exporter.download_all(&statements(&["A", "B"]), None).await;
        assert!(matches!(outcome, ExportOutcome::Archive(_)));
        assert_eq!(sink.file_names().await.len(), 1);
    }

    #[tokio::test]
    async fn test_print_document() {
        let exporter = exporter(Arc::new(MemorySink::new()));
        let surface = RecordingPrintSurface::new();
        let docs = statements(&["A"]);

        let outcome = exporter.print_document(&docs[0], &surface).await.unwrap();
        assert_eq!(
            outcome,
            PrintOutcome::Printed {
                file_name: "거래명세서_A_2025-09-16.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_labels() {
        let labels = ExportLabels::default();
        assert_eq!(labels.single(DocumentKind::Statement), "거래명세서");
        assert_eq!(labels.batch(DocumentKind::Statement), "거래명세서_일괄");
        assert_eq!(labels.single(DocumentKind::Quote), "견적서");
        assert_eq!(labels.batch(DocumentKind::Quote), "견적서_일괄");
    }
}
