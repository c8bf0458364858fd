//! # Snapshot Capture
//!
//! Renders the off-screen work-status view to a PNG and saves it as
//! `작업현황_{partner}_{status}_{YYYY-MM-DD}.png`.
//!
//! ## Failure Policy
//! Capture never raises. A missing view, a zero-size or fully filtered view,
//! an encoder error or a sink error is logged and the call returns `None`.

pub mod font;
pub mod raster;
pub mod view;

use std::sync::Arc;
use tracing::{error, info, warn};

use atelier_core::format::capture_file_name;
use atelier_core::Clock;

use crate::layout::Rgb;
use crate::sink::{FileSink, SavedFile};

pub use font::CaptureFont;
pub use raster::rasterize;
pub use view::{CaptureNode, CaptureRow, CaptureView, FilterSummary};

/// Node predicate; `false` leaves the node out of the image.
pub type NodeFilter = fn(&CaptureNode) -> bool;

/// Drops `SCRIPT`, `STYLE` and `NOSCRIPT` nodes.
pub fn default_node_filter(node: &CaptureNode) -> bool {
    !matches!(node.tag_name(), "SCRIPT" | "STYLE" | "NOSCRIPT")
}

/// Rasterization settings.
#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// Device pixels per logical pixel.
    pub pixel_ratio: u32,
    pub background: Rgb,
    pub filter: NodeFilter,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            pixel_ratio: 2,
            background: Rgb::hex(0xFFFFFF),
            filter: default_node_filter,
        }
    }
}

/// Saves PNG snapshots of the work-status view.
pub struct CaptureExporter {
    sink: Arc<dyn FileSink>,
    clock: Arc<dyn Clock>,
    options: CaptureOptions,
    font: Option<Arc<CaptureFont>>,
}

impl CaptureExporter {
    pub fn new(sink: Arc<dyn FileSink>, clock: Arc<dyn Clock>) -> Self {
        CaptureExporter {
            sink,
            clock,
            options: CaptureOptions::default(),
            font: None,
        }
    }

    /// Face used for snapshot text; without one, text is left out.
    pub fn with_font(mut self, font: Option<CaptureFont>) -> Self {
        self.font = font.map(Arc::new);
        self
    }

    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    /// Captures `view` and saves it; `None` on any failure.
    ///
    /// `partner` and `status` are the active filters, used in the file name.
    pub async fn capture(
        &self,
        view: Option<&CaptureView>,
        partner: Option<&str>,
        status: Option<&str>,
    ) -> Option<SavedFile> {
        let Some(view) = view else {
            warn!("Capture target not found");
            return None;
        };

        let bytes = match rasterize(view, &self.options, self.font.as_deref()) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to render capture image");
                return None;
            }
        };

        let file_name = capture_file_name(partner, status, self.clock.today());
        match self.sink.save(&file_name, &bytes).await {
            Ok(saved) => {
                info!(file = %saved.file_name, rows = view.row_count(), "Capture saved");
                Some(saved)
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "Failed to save capture image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use atelier_core::{FixedClock, WorkStatusRecord};

    fn exporter(sink: Arc<MemorySink>) -> CaptureExporter {
        CaptureExporter::new(sink, Arc::new(FixedClock::ymd(2025, 9, 16)))
    }

    #[test]
    fn test_default_filter() {
        assert!(default_node_filter(&CaptureNode::Heading("x".to_string())));
        assert!(!default_node_filter(&CaptureNode::Script("x".to_string())));
        assert!(!default_node_filter(&CaptureNode::Style("x".to_string())));
        assert!(!default_node_filter(&CaptureNode::NoScript("x".to_string())));
    }

    #[tokio::test]
    async fn test_capture_saves_png() {
        let sink = Arc::new(MemorySink::new());
        let records = vec![WorkStatusRecord::new("1", "A파트너")];
        let view = CaptureView::from_records(
            &records,
            FilterSummary::new(Some("A파트너"), None, "전체 기간"),
        );

        let saved = exporter(sink.clone())
            .capture(Some(&view), Some("A파트너"), None)
            .await
            .unwrap();
        assert_eq!(saved.file_name, "작업현황_A파트너_전체_2025-09-16.png");

        let bytes = sink.get(&saved.file_name).await.unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn test_capture_draws_with_font() {
        let sink = Arc::new(MemorySink::new());
        let bytes = font::testing::font_with_glyphs("가나상사");
        let font = CaptureFont::from_bytes(bytes, std::path::Path::new("test.ttf")).unwrap();
        let records = vec![WorkStatusRecord::new("1", "가나상사")];
        let view = CaptureView::from_records(&records, FilterSummary::default());

        let plain = exporter(sink.clone())
            .capture(Some(&view), Some("가나상사"), None)
            .await
            .unwrap();
        let plain_bytes = sink.get(&plain.file_name).await.unwrap();

        let with_font = exporter(sink.clone()).with_font(Some(font));
        let drawn = with_font
            .capture(Some(&view), Some("가나상사"), Some("대기중"))
            .await
            .unwrap();
        let drawn_bytes = sink.get(&drawn.file_name).await.unwrap();
        assert_ne!(plain_bytes, drawn_bytes);
    }

    #[tokio::test]
    async fn test_missing_view_returns_none() {
        let sink = Arc::new(MemorySink::new());
        assert!(exporter(sink.clone()).capture(None, None, None).await.is_none());
        assert!(sink.file_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_ratio_returns_none() {
        let sink = Arc::new(MemorySink::new());
        let view = CaptureView::from_records(&[], FilterSummary::default());
        let exporter = exporter(sink.clone()).with_options(CaptureOptions {
            pixel_ratio: 0,
            ..CaptureOptions::default()
        });

        assert!(exporter.capture(Some(&view), None, None).await.is_none());
        assert!(sink.file_names().await.is_empty());
    }
}
