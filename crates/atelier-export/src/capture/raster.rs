//! # Capture Rasterizer
//!
//! Paints a [`CaptureView`] into a PNG.
//!
//! ## Geometry (logical px, multiplied by the pixel ratio on output)
//! ```text
//!  0 ┌────────────────────────────── 1200 ─────────────────────────────────┐
//! 32 │  작업 현황 (heading)                      ┌ 거래처: …  ────────────┐  │
//!    │                                           │ 진행 상태: …           │  │
//!    │                                           │ 기간: …                │  │
//!    │                                           └────────────────────────┘  │
//!    │  ┌ 이미지 │ 거래처명 │ 스타일넘버 │ 오더수량 │ … │ 출고일 ┐  header 40 │
//!    │  │ [img]  │ A파트너  │ ST-1       │  100개   │ … │        │  row 88    │
//!    │  │░[img]░░│░B파트너░░│░░░░░░░░░░░░│░░░░░░░░░░│░…░│░░░░░░░░│  zebra     │
//!    │  └─────────────────────────────────────────────────────────┘           │
//!    └───────────────────────────────────────────────────────────────────────┘
//!       40 px side padding, 32 px top/bottom padding
//! ```
//!
//! Text is drawn with the configured TrueType face ([`CaptureFont`]). With
//! no face the boxes, fills and badges are still painted but text is left
//! out. Product images are drawn as placeholders.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use tracing::warn;

use atelier_core::format::group_thousands;
use atelier_core::WorkStatus;

use super::font::CaptureFont;
use super::view::{CaptureNode, CaptureRow, CaptureView, FilterSummary, CAPTURE_HEADERS, EMPTY_MESSAGE};
use super::CaptureOptions;
use crate::error::{ExportError, ExportResult};
use crate::layout::Rgb;

pub const LOGICAL_WIDTH: u32 = 1200;
/// Tallest image produced, in device pixels; taller views are clipped.
pub const MAX_DEVICE_HEIGHT: u32 = 32_768;

pub const COLUMN_WIDTHS: [u32; 9] = [88, 150, 150, 110, 120, 120, 120, 110, 152];

const PAD_X: u32 = 40;
const PAD_Y: u32 = 32;
const SECTION_GAP: u32 = 24;
const HEADER_ROW_HEIGHT: u32 = 40;
const ROW_HEIGHT: u32 = 88;
const EMPTY_ROW_HEIGHT: u32 = 96;
/// Text line height in logical px.
const TEXT_PX: u32 = 16;
const HEADING_PX: u32 = 24;
const SUMMARY_WIDTH: u32 = 300;
const SUMMARY_PAD: u32 = 12;
const SUMMARY_LINE: u32 = 20;
const TEXT_LINE: u32 = 24;
const CELL_PAD: u32 = 12;
const THUMB_SIZE: u32 = 64;
const BADGE_HEIGHT: u32 = 22;
const BADGE_PAD: u32 = 8;

const CONTENT_WIDTH: u32 = LOGICAL_WIDTH - 2 * PAD_X;

const BORDER: Rgb = Rgb::hex(0xE5E7EB);
const SUMMARY_BORDER: Rgb = Rgb::hex(0xD1D5DB);
const SUMMARY_FILL: Rgb = Rgb::hex(0xF9FAFB);
const SUMMARY_TEXT: Rgb = Rgb::hex(0x4B5563);
const MUTED_FILL: Rgb = Rgb::hex(0xF3F4F6);
pub const ZEBRA_FILL: Rgb = Rgb::hex(0xF9FAFB);
const TEXT: Rgb = Rgb::hex(0x111827);
const MUTED_TEXT: Rgb = Rgb::hex(0x6B7280);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

const COLUMN_ALIGN: [Align; 9] = [
    Align::Center,
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Center,
    Align::Center,
    Align::Center,
    Align::Right,
    Align::Center,
];

/// Badge `(background, text)` colors per status.
pub fn badge_colors(status: &WorkStatus) -> (Rgb, Rgb) {
    match status {
        WorkStatus::Waiting => (Rgb::hex(0xFEF9C3), Rgb::hex(0x854D0E)),
        WorkStatus::InProgress => (Rgb::hex(0xDBEAFE), Rgb::hex(0x1E40AF)),
        WorkStatus::PostProcessing => (Rgb::hex(0xF3E8FF), Rgb::hex(0x6B21A8)),
        WorkStatus::Shipped => (Rgb::hex(0xDCFCE7), Rgb::hex(0x166534)),
        WorkStatus::Other(_) => (MUTED_FILL, Rgb::hex(0x374151)),
    }
}

// =============================================================================
// Canvas
// =============================================================================

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// RGBA surface addressed in logical pixels.
pub struct Canvas<'f> {
    image: RgbaImage,
    ratio: u32,
    font: Option<&'f CaptureFont>,
}

impl<'f> Canvas<'f> {
    pub fn new(width: u32, height: u32, ratio: u32, background: Rgb) -> ExportResult<Self> {
        if width == 0 || height == 0 || ratio == 0 {
            return Err(ExportError::Capture(format!(
                "zero-size view ({width}x{height} at {ratio}x)"
            )));
        }

        let device_height = height.saturating_mul(ratio);
        if device_height > MAX_DEVICE_HEIGHT {
            warn!(
                height = device_height,
                max = MAX_DEVICE_HEIGHT,
                "Capture taller than the maximum image height, clipping"
            );
        }

        Ok(Canvas {
            image: RgbaImage::from_pixel(
                width.saturating_mul(ratio),
                device_height.min(MAX_DEVICE_HEIGHT),
                rgba(background),
            ),
            ratio,
            font: None,
        })
    }

    pub fn with_font(mut self, font: Option<&'f CaptureFont>) -> Self {
        self.font = font;
        self
    }

    /// Device pixel dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.image.width() && y < self.image.height() {
            let [r, g, b, _] = self.image.get_pixel(x, y).0;
            Some(Rgb { r, g, b })
        } else {
            None
        }
    }

    /// Fills a logical rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let (max_x, max_y) = self.image.dimensions();
        let x0 = x.saturating_mul(self.ratio).min(max_x);
        let y0 = y.saturating_mul(self.ratio).min(max_y);
        let x1 = x.saturating_add(width).saturating_mul(self.ratio).min(max_x);
        let y1 = y.saturating_add(height).saturating_mul(self.ratio).min(max_y);

        let pixel = rgba(color);
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }

    /// One-pixel outline.
    pub fn stroke_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        if width == 0 || height == 0 {
            return;
        }
        self.fill_rect(x, y, width, 1, color);
        self.fill_rect(x, y + height - 1, width, 1, color);
        self.fill_rect(x, y, 1, height, color);
        self.fill_rect(x + width - 1, y, 1, height, color);
    }

    /// Draws `text` in a `size` px line with its top-left at `(x, y)`,
    /// blending glyph coverage over the existing pixels.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, size: u32, color: Rgb) {
        let Some(font) = self.font else { return };
        let ratio = self.ratio as f32;
        let image = &mut self.image;
        let (width, height) = image.dimensions();

        font.draw(
            x as f32 * ratio,
            y as f32 * ratio,
            text,
            size as f32 * ratio,
            |px, py, coverage| {
                if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                    return;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                let coverage = coverage.clamp(0.0, 1.0);
                for (channel, target) in pixel.0.iter_mut().zip([color.r, color.g, color.b]) {
                    let blended = *channel as f32 + (target as f32 - *channel as f32) * coverage;
                    *channel = blended.round() as u8;
                }
            },
        );
    }

    /// Width of `text` in logical pixels; zero without a font.
    pub fn text_width(&self, text: &str, size: u32) -> u32 {
        self.font
            .map_or(0, |font| font.text_width(text, size as f32).ceil() as u32)
    }

    /// Longest prefix of `text` that fits `max_width`.
    fn fit_chars(&self, text: &str, max_width: u32, size: u32) -> String {
        let mut out = String::new();
        for ch in text.chars() {
            out.push(ch);
            if self.text_width(&out, size) > max_width {
                out.pop();
                break;
            }
        }
        out
    }

    pub fn into_png(self) -> ExportResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

// =============================================================================
// Placement
// =============================================================================

enum Block<'a> {
    Header {
        heading: Option<&'a str>,
        summary: Option<&'a FilterSummary>,
    },
    Table(&'a [CaptureRow]),
    Text(&'a str),
}

struct Placed<'a> {
    y: u32,
    height: u32,
    block: Block<'a>,
}

fn header_height(heading: Option<&str>, summary: Option<&FilterSummary>) -> u32 {
    let heading = heading.map_or(0, |_| HEADING_PX);
    let summary = summary.map_or(0, |_| SUMMARY_PAD * 2 + 3 * SUMMARY_LINE);
    heading.max(summary)
}

fn table_height(rows: &[CaptureRow]) -> u32 {
    let body = if rows.is_empty() {
        EMPTY_ROW_HEIGHT
    } else {
        (rows.len() as u32).saturating_mul(ROW_HEIGHT)
    };
    HEADER_ROW_HEIGHT.saturating_add(body)
}

/// Stacks the visible nodes top to bottom; returns blocks and total height.
fn place<'a>(nodes: &[&'a CaptureNode]) -> (Vec<Placed<'a>>, u32) {
    let heading = nodes.iter().find_map(|n| match n {
        CaptureNode::Heading(text) => Some(text.as_str()),
        _ => None,
    });
    let summary = nodes.iter().find_map(|n| match n {
        CaptureNode::FilterSummary(summary) => Some(summary),
        _ => None,
    });

    let mut placed = Vec::new();
    let mut y = PAD_Y;

    if heading.is_some() || summary.is_some() {
        let height = header_height(heading, summary);
        placed.push(Placed {
            y,
            height,
            block: Block::Header { heading, summary },
        });
        y = y.saturating_add(height + SECTION_GAP);
    }

    for node in nodes {
        let (block, height, gap) = match node {
            CaptureNode::Table(rows) => (Block::Table(rows.as_slice()), table_height(rows), SECTION_GAP),
            CaptureNode::Script(text) | CaptureNode::Style(text) | CaptureNode::NoScript(text) => {
                (Block::Text(text.as_str()), TEXT_LINE, 0)
            }
            CaptureNode::Heading(_) | CaptureNode::FilterSummary(_) => continue,
        };
        placed.push(Placed { y, height, block });
        y = y.saturating_add(height + gap);
    }

    let bottom = placed
        .last()
        .map_or(PAD_Y, |last| last.y.saturating_add(last.height));
    (placed, bottom.saturating_add(PAD_Y))
}

// =============================================================================
// Painting
// =============================================================================

/// Rasterizes the view to PNG bytes.
pub fn rasterize(
    view: &CaptureView,
    options: &CaptureOptions,
    font: Option<&CaptureFont>,
) -> ExportResult<Vec<u8>> {
    let canvas = render_canvas(view, options, font)?;
    canvas.into_png()
}

/// Rasterizes the view without encoding.
pub fn render_canvas<'f>(
    view: &CaptureView,
    options: &CaptureOptions,
    font: Option<&'f CaptureFont>,
) -> ExportResult<Canvas<'f>> {
    let visible: Vec<&CaptureNode> = view
        .nodes()
        .iter()
        .filter(|node| (options.filter)(node))
        .collect();
    if visible.is_empty() {
        return Err(ExportError::Capture("nothing visible to capture".to_string()));
    }

    let (blocks, height) = place(&visible);
    let mut canvas =
        Canvas::new(LOGICAL_WIDTH, height, options.pixel_ratio, options.background)?.with_font(font);
    canvas.stroke_rect(0, 0, LOGICAL_WIDTH, height, BORDER);

    for placed in &blocks {
        match &placed.block {
            Block::Header { heading, summary } => paint_header(&mut canvas, placed.y, *heading, *summary),
            Block::Table(rows) => paint_table(&mut canvas, placed.y, rows),
            Block::Text(text) => {
                let fitted = canvas.fit_chars(text, CONTENT_WIDTH, TEXT_PX);
                canvas.draw_text(PAD_X, placed.y, &fitted, TEXT_PX, TEXT);
            }
        }
    }

    Ok(canvas)
}

fn paint_header(canvas: &mut Canvas, y: u32, heading: Option<&str>, summary: Option<&FilterSummary>) {
    if let Some(heading) = heading {
        canvas.draw_text(PAD_X, y, heading, HEADING_PX, TEXT);
    }

    if let Some(summary) = summary {
        let x = LOGICAL_WIDTH - PAD_X - SUMMARY_WIDTH;
        let height = SUMMARY_PAD * 2 + 3 * SUMMARY_LINE;
        canvas.fill_rect(x, y, SUMMARY_WIDTH, height, SUMMARY_FILL);
        canvas.stroke_rect(x, y, SUMMARY_WIDTH, height, SUMMARY_BORDER);

        let inner = SUMMARY_WIDTH - SUMMARY_PAD * 2;
        for (i, line) in summary.lines().iter().enumerate() {
            let fitted = canvas.fit_chars(line, inner, TEXT_PX);
            canvas.draw_text(
                x + SUMMARY_PAD,
                y + SUMMARY_PAD + i as u32 * SUMMARY_LINE,
                &fitted,
                TEXT_PX,
                SUMMARY_TEXT,
            );
        }
    }
}

fn column_x(index: usize) -> u32 {
    PAD_X + COLUMN_WIDTHS[..index].iter().sum::<u32>()
}

fn paint_cell_text(canvas: &mut Canvas, col: usize, top: u32, row_height: u32, text: &str, color: Rgb) {
    let width = COLUMN_WIDTHS[col];
    let fitted = canvas.fit_chars(text, width.saturating_sub(CELL_PAD * 2), TEXT_PX);
    let text_w = canvas.text_width(&fitted, TEXT_PX);
    let left = column_x(col);
    let x = match COLUMN_ALIGN[col] {
        Align::Left => left + CELL_PAD,
        Align::Center => left + width.saturating_sub(text_w) / 2,
        Align::Right => (left + width).saturating_sub(CELL_PAD + text_w),
    };
    let y = top + row_height.saturating_sub(TEXT_PX) / 2;
    canvas.draw_text(x, y, &fitted, TEXT_PX, color);
}

fn paint_table(canvas: &mut Canvas, y: u32, rows: &[CaptureRow]) {
    let height = table_height(rows);

    canvas.fill_rect(PAD_X, y, CONTENT_WIDTH, HEADER_ROW_HEIGHT, MUTED_FILL);
    for (col, header) in CAPTURE_HEADERS.iter().enumerate() {
        paint_cell_text(canvas, col, y, HEADER_ROW_HEIGHT, header, MUTED_TEXT);
    }

    let body_top = y + HEADER_ROW_HEIGHT;
    if rows.is_empty() {
        canvas.fill_rect(PAD_X, body_top, CONTENT_WIDTH, 1, BORDER);
        let text_w = canvas.text_width(EMPTY_MESSAGE, TEXT_PX);
        let x = PAD_X + CONTENT_WIDTH.saturating_sub(text_w) / 2;
        let text_y = body_top + (EMPTY_ROW_HEIGHT - TEXT_PX) / 2;
        canvas.draw_text(x, text_y, EMPTY_MESSAGE, TEXT_PX, MUTED_TEXT);
    }

    for (index, row) in rows.iter().enumerate() {
        let top = body_top + index as u32 * ROW_HEIGHT;
        if index % 2 == 1 {
            canvas.fill_rect(PAD_X, top, CONTENT_WIDTH, ROW_HEIGHT, ZEBRA_FILL);
        }
        canvas.fill_rect(PAD_X, top, CONTENT_WIDTH, 1, BORDER);
        paint_row(canvas, top, row);
    }

    canvas.stroke_rect(PAD_X, y, CONTENT_WIDTH, height, BORDER);
}

fn paint_row(canvas: &mut Canvas, top: u32, row: &CaptureRow) {
    // image placeholder
    let thumb_x = column_x(0) + (COLUMN_WIDTHS[0] - THUMB_SIZE) / 2;
    let thumb_y = top + (ROW_HEIGHT - THUMB_SIZE) / 2;
    canvas.fill_rect(thumb_x, thumb_y, THUMB_SIZE, THUMB_SIZE, MUTED_FILL);
    canvas.stroke_rect(thumb_x, thumb_y, THUMB_SIZE, THUMB_SIZE, BORDER);

    let quantity = |n: i64| format!("{}개", group_thousands(n));
    let cells: [(usize, String, Rgb); 7] = [
        (1, row.partner_name.clone(), TEXT),
        (2, row.style_no.clone(), MUTED_TEXT),
        (3, quantity(row.order_quantity), TEXT),
        (4, row.receive_date.clone(), MUTED_TEXT),
        (5, row.expected_ship_date.clone(), MUTED_TEXT),
        (7, quantity(row.work_quantity), TEXT),
        (8, row.ship_date.clone(), MUTED_TEXT),
    ];
    for (col, text, color) in &cells {
        paint_cell_text(canvas, *col, top, ROW_HEIGHT, text, *color);
    }

    paint_badge(canvas, 6, top, &row.status);
}

fn paint_badge(canvas: &mut Canvas, col: usize, top: u32, status: &WorkStatus) {
    let (background, foreground) = badge_colors(status);
    let width = COLUMN_WIDTHS[col];
    let inner = width - CELL_PAD * 2;

    let label = canvas.fit_chars(status.label(), inner - BADGE_PAD * 2, TEXT_PX);
    let badge_w = (canvas.text_width(&label, TEXT_PX) + BADGE_PAD * 2).min(inner);
    let x = column_x(col) + (width - badge_w) / 2;
    let y = top + (ROW_HEIGHT - BADGE_HEIGHT) / 2;

    canvas.fill_rect(x, y, badge_w, BADGE_HEIGHT, background);
    canvas.draw_text(
        x + BADGE_PAD,
        y + (BADGE_HEIGHT - TEXT_PX) / 2,
        &label,
        TEXT_PX,
        foreground,
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::font::testing::font_with_glyphs;
    use crate::capture::view::FilterSummary;
    use atelier_core::WorkStatusRecord;
    use std::path::Path;

    const WHITE: Rgb = Rgb::hex(0xFFFFFF);

    fn view(count: usize) -> CaptureView {
        let records: Vec<WorkStatusRecord> = (0..count)
            .map(|i| {
                let mut r = WorkStatusRecord::new(i.to_string(), "A");
                r.style_no = format!("ST-{i}");
                r.order_quantity = 1000;
                r.status = WorkStatus::Shipped;
                r
            })
            .collect();
        CaptureView::from_records(&records, FilterSummary::default())
    }

    #[test]
    fn test_column_widths_fill_content() {
        assert_eq!(COLUMN_WIDTHS.iter().sum::<u32>(), CONTENT_WIDTH);
    }

    fn hangul_font() -> CaptureFont {
        let bytes = font_with_glyphs("가나상사다라무역작업현황");
        CaptureFont::from_bytes(bytes, Path::new("test.ttf")).unwrap()
    }

    fn one_row(partner: &str) -> CaptureView {
        let records = vec![WorkStatusRecord::new("1", partner)];
        CaptureView::from_records(&records, FilterSummary::new(None, None, "전체 기간"))
    }

    #[test]
    fn test_text_width_and_fit() {
        let font = hangul_font();
        let canvas = Canvas::new(10, 10, 1, WHITE).unwrap().with_font(Some(&font));
        assert_eq!(canvas.text_width("", 20), 0);
        assert_eq!(canvas.text_width("가나", 20), 40);
        assert_eq!(canvas.fit_chars("가나상사", 50, 20), "가나");

        let bare = Canvas::new(10, 10, 1, WHITE).unwrap();
        assert_eq!(bare.text_width("가나", 20), 0);
    }

    #[test]
    fn test_draw_hangul_pixels() {
        let font = hangul_font();
        let mut canvas = Canvas::new(40, 20, 1, WHITE).unwrap().with_font(Some(&font));
        canvas.draw_text(0, 0, "가", 20, TEXT);
        // glyph bar spans x 2..4, y 2..16 at 20 px
        assert_eq!(canvas.pixel(2, 10), Some(TEXT));
        assert_eq!(canvas.pixel(0, 10), Some(WHITE));
        assert_eq!(canvas.pixel(10, 10), Some(WHITE));
    }

    #[test]
    fn test_different_hangul_partners_differ() {
        let font = hangul_font();
        let options = CaptureOptions::default();
        let first = rasterize(&one_row("가나상사"), &options, Some(&font)).unwrap();
        let second = rasterize(&one_row("다라무역"), &options, Some(&font)).unwrap();
        let again = rasterize(&one_row("가나상사"), &options, Some(&font)).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, again);
    }

    #[test]
    fn test_without_font_text_is_left_out() {
        let mut canvas = Canvas::new(40, 20, 1, WHITE).unwrap();
        canvas.draw_text(0, 0, "가", 20, TEXT);
        assert_eq!(canvas.pixel(2, 10), Some(WHITE));
    }

    #[test]
    fn test_pixel_ratio_scales_rects() {
        let mut canvas = Canvas::new(10, 10, 2, WHITE).unwrap();
        canvas.fill_rect(1, 1, 1, 1, TEXT);
        assert_eq!(canvas.dimensions(), (20, 20));
        assert_eq!(canvas.pixel(2, 2), Some(TEXT));
        assert_eq!(canvas.pixel(3, 3), Some(TEXT));
        assert_eq!(canvas.pixel(4, 4), Some(WHITE));
        assert_eq!(canvas.pixel(20, 0), None);
    }

    #[test]
    fn test_zero_size_is_error() {
        assert!(Canvas::new(0, 10, 2, WHITE).is_err());
        assert!(Canvas::new(10, 10, 0, WHITE).is_err());
    }

    #[test]
    fn test_rows_and_zebra() {
        let canvas = render_canvas(&view(2), &CaptureOptions::default(), None).unwrap();
        // 32 + 84 + 24 + 40 + 2 * 88 + 32
        assert_eq!(canvas.dimensions(), (2400, 388 * 2));

        let sample_x = (column_x(1) + 2) * 2;
        let first_row = (32 + 84 + 24 + 40 + 4) * 2;
        let second_row = first_row + ROW_HEIGHT * 2;
        assert_eq!(canvas.pixel(sample_x, first_row), Some(WHITE));
        assert_eq!(canvas.pixel(sample_x, second_row), Some(ZEBRA_FILL));
    }

    #[test]
    fn test_empty_table_shows_message_row() {
        let canvas = render_canvas(&view(0), &CaptureOptions::default(), None).unwrap();
        assert_eq!(canvas.dimensions(), (2400, (32 + 84 + 24 + 40 + 96 + 32) * 2));
    }

    #[test]
    fn test_script_nodes_filtered() {
        let mut with_script = view(1);
        with_script.push(CaptureNode::Script("alert(1)".to_string()));
        with_script.push(CaptureNode::Style("body{}".to_string()));

        let default = render_canvas(&with_script, &CaptureOptions::default(), None).unwrap();
        let plain = render_canvas(&view(1), &CaptureOptions::default(), None).unwrap();
        assert_eq!(default.dimensions(), plain.dimensions());

        let keep_all = CaptureOptions {
            filter: |_| true,
            ..CaptureOptions::default()
        };
        let unfiltered = render_canvas(&with_script, &keep_all, None).unwrap();
        assert!(unfiltered.dimensions().1 > plain.dimensions().1);
    }

    #[test]
    fn test_nothing_visible_is_error() {
        let only_script = CaptureView::from_nodes(vec![CaptureNode::Script("x".to_string())]);
        assert!(rasterize(&only_script, &CaptureOptions::default(), None).is_err());
    }

    #[test]
    fn test_png_output() {
        let bytes = rasterize(&view(1), &CaptureOptions::default(), None).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 2400);
    }

    #[test]
    fn test_badge_colors() {
        assert_eq!(badge_colors(&WorkStatus::Waiting).0, Rgb::hex(0xFEF9C3));
        assert_eq!(badge_colors(&WorkStatus::Shipped).1, Rgb::hex(0x166534));
        assert_eq!(
            badge_colors(&WorkStatus::Other("작업완료".to_string())).0,
            MUTED_FILL
        );
    }
}
