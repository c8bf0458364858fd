//! # Page Layout
//!
//! Turns a statement or quote into a list of draw operations on A4 pages.
//! Every output pathway (single file, zip batch, print) renders the same
//! [`PageLayout`], so the visual form cannot diverge between them.
//!
//! ## Page Structure (mm, origin top-left)
//! ```text
//!   0 ┌──────────────────────────────────────────────────────────┐
//!  10 │                     거래명세서  (22pt bold)                │
//!     │                                    작성일: 2025. 9. 16.  │ ← right (statement)
//!     │ ┌── 공급받는자 ─────────────┐  ┌── 공급자 ──────── [seal]┐ │   center (quote)
//!     │ │ 상호 / 등록번호 / 사업장 │  │ 상호 / 등록번호 / ...   │ │
//!     │ └──────────────────────────┘  └─────────────────────────┘ │
//!     │ ┌────┬──────────────┬─────┬──────┬───────┬──────┐         │
//!     │ │번호│ 품목(스타일) │ 수량│ 단가 │ 금액  │ 비고 │ #DBEAFE │
//!     │ ├────┼──────────────┼─────┼──────┼───────┼──────┤         │
//!     │ │ 1  │ ST-1         │  3  │1,000원│3,000원│      │         │
//!     │ │합계│              │     │      │4,000원│      │         │
//!     │ └────┴──────────────┴─────┴──────┴───────┴──────┘         │
//!     │ ┌ 공급가액 / 부가세(10%) / 합계금액 ─────────────────────┐ │
//!     │ ┌ 입금 계좌 (statements only) ───────────────────────────┐ │
//! 287 └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows that do not fit continue on a new page under a repeated header.

use atelier_core::format::group_thousands;
use atelier_core::{FinancialDocument, Party, CURRENCY_SUFFIX};

// =============================================================================
// Geometry Constants
// =============================================================================

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const PAGE_PADDING_MM: f32 = 10.0;

/// Width available between the page paddings.
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * PAGE_PADDING_MM;

/// Relative table column widths; scaled to fill the content width.
pub const COLUMN_WIDTHS_MM: [f32; 6] = [12.0, 52.0, 18.0, 22.0, 24.0, 24.0];

pub const TABLE_HEADERS: [&str; 6] = ["번호", "품목(스타일)", "수량", "단가", "금액", "비고"];

pub const SEAL_SIZE_MM: f32 = 24.0;

const PT_TO_MM: f32 = 0.352_778;
const BODY_PT: f32 = 11.0;
const TITLE_PT: f32 = 22.0;
const BOX_TITLE_PT: f32 = 12.0;
const BOX_GAP_MM: f32 = 4.0;
const BOX_PADDING_MM: f32 = 4.0;
const INFO_LABEL_WIDTH_MM: f32 = 22.0;
const INFO_LINE_GAP_MM: f32 = 1.2;
const CELL_PAD_X_MM: f32 = 2.4;
const CELL_PAD_Y_MM: f32 = 2.2;
const SECTION_GAP_MM: f32 = 6.0;
const TOTALS_LINE_GAP_MM: f32 = 1.8;

// =============================================================================
// Colors
// =============================================================================

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Components in `0.0..=1.0`.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

pub const BORDER_PRIMARY: Rgb = Rgb::hex(0x1D4ED8);
pub const HEADER_FILL: Rgb = Rgb::hex(0xDBEAFE);
pub const TEXT_COLOR: Rgb = Rgb::hex(0x111827);

// =============================================================================
// Draw Model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One run of text. `x` is the anchor for `align`; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_pt: f32,
    pub weight: FontWeight,
    pub align: TextAlign,
    pub color: Rgb,
}

impl TextOp {
    /// Left edge after resolving alignment with the estimated width.
    pub fn left_x(&self) -> f32 {
        let width = estimate_text_width_mm(&self.text, self.size_pt);
        match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - width / 2.0,
            TextAlign::Right => self.x - width,
        }
    }
}

/// A drawing primitive in page millimetres, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
    },
    /// Raster image referenced by path or data URL.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        source: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Renderer-independent description of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub title: String,
    pub pages: Vec<Page>,
}

impl PageLayout {
    /// All text runs across pages, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.pages.iter().flat_map(|page| {
            page.ops.iter().filter_map(|op| match op {
                DrawOp::Text(text) => Some(text),
                _ => None,
            })
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.text == needle)
    }
}

// =============================================================================
// Text Metrics
// =============================================================================

/// Rough advance width of `text`: Latin glyphs ~0.55em, spaces ~0.28em,
/// Hangul and other wide glyphs a full em.
pub fn estimate_text_width_mm(text: &str, size_pt: f32) -> f32 {
    let em = size_pt * PT_TO_MM;
    text.chars()
        .map(|c| {
            if c == ' ' {
                0.28
            } else if c.is_ascii() {
                0.55
            } else {
                1.0
            }
        })
        .sum::<f32>()
        * em
}

/// Truncates `text` with `…` so it fits `max_width_mm`.
pub fn fit_text(text: &str, max_width_mm: f32, size_pt: f32) -> String {
    if estimate_text_width_mm(text, size_pt) <= max_width_mm {
        return text.to_string();
    }

    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_mm(&candidate, size_pt) > max_width_mm {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.2
}

/// Baseline of a line whose box starts at `top`.
fn baseline(top: f32, size_pt: f32) -> f32 {
    top + size_pt * PT_TO_MM * 0.95
}

fn won(value: i64) -> String {
    format!("{}{}", group_thousands(value), CURRENCY_SUFFIX)
}

// =============================================================================
// Layout Builder
// =============================================================================

struct PageCursor {
    pages: Vec<Page>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        PageCursor {
            pages: vec![Page::default()],
            y: PAGE_PADDING_MM,
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size_pt: f32, weight: FontWeight, align: TextAlign) {
        self.text_colored(text, x, y, size_pt, weight, align, TEXT_COLOR);
    }

    #[allow(clippy::too_many_arguments)]
    fn text_colored(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size_pt: f32,
        weight: FontWeight,
        align: TextAlign,
        color: Rgb,
    ) {
        self.push(DrawOp::Text(TextOp {
            text: text.into(),
            x,
            y,
            size_pt,
            weight,
            align,
            color,
        }));
    }

    fn bordered_box(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some(BORDER_PRIMARY),
        });
    }

    fn remaining(&self) -> f32 {
        PAGE_HEIGHT_MM - PAGE_PADDING_MM - self.y
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_PADDING_MM;
    }
}

/// Lays out one statement or quote.
pub fn layout_document<B: Party>(doc: &FinancialDocument<B>) -> PageLayout {
    let mut cursor = PageCursor::new();
    let right = PAGE_WIDTH_MM - PAGE_PADDING_MM;

    // Title
    cursor.text(
        doc.kind.title(),
        PAGE_WIDTH_MM / 2.0,
        baseline(cursor.y, TITLE_PT),
        TITLE_PT,
        FontWeight::Bold,
        TextAlign::Center,
    );
    cursor.y += line_height(TITLE_PT) + 4.0;

    // Issue date
    let (date_x, date_align) = if doc.kind.centers_issue_date() {
        (PAGE_WIDTH_MM / 2.0, TextAlign::Center)
    } else {
        (right, TextAlign::Right)
    };
    cursor.text(
        format!("작성일: {}", doc.date),
        date_x,
        baseline(cursor.y, BODY_PT),
        BODY_PT,
        FontWeight::Regular,
        date_align,
    );
    cursor.y += line_height(BODY_PT) + 4.0;

    layout_info_boxes(&mut cursor, doc);
    layout_table(&mut cursor, doc);
    layout_totals(&mut cursor, doc);

    if doc.kind.shows_account_footer() {
        layout_account_footer(&mut cursor, &doc.supplier.account_number);
    }

    PageLayout {
        title: doc.kind.title().to_string(),
        pages: cursor.pages,
    }
}

fn supplier_rows<B>(doc: &FinancialDocument<B>) -> Vec<(&'static str, String)> {
    let supplier = &doc.supplier;
    vec![
        ("상호", supplier.company_name.clone()),
        ("등록번호", supplier.registration_number.clone()),
        ("사업장", supplier.business_address.clone()),
        (
            "대표자",
            supplier.representative_name.clone().unwrap_or_default(),
        ),
        ("연락처", supplier.phone.clone()),
    ]
}

fn layout_info_boxes<B: Party>(cursor: &mut PageCursor, doc: &FinancialDocument<B>) {
    let box_width = (CONTENT_WIDTH_MM - BOX_GAP_MM) / 2.0;
    let buyer_x = PAGE_PADDING_MM;
    let supplier_x = PAGE_PADDING_MM + box_width + BOX_GAP_MM;
    let top = cursor.y;

    let buyer_rows = doc.buyer.info_rows();
    let supplier_rows = supplier_rows(doc);
    let row_step = line_height(BODY_PT) + INFO_LINE_GAP_MM;
    let title_step = line_height(BOX_TITLE_PT) + 2.0;
    let rows = buyer_rows.len().max(supplier_rows.len()) as f32;
    let height = BOX_PADDING_MM * 2.0 + title_step + rows * row_step;

    let boxes: [(f32, &str, &[(&'static str, String)]); 2] = [
        (buyer_x, doc.buyer.box_title(), &buyer_rows),
        (supplier_x, "공급자", &supplier_rows),
    ];

    for (x, title, rows) in boxes {
        cursor.bordered_box(x, top, box_width, height);

        let mut y = top + BOX_PADDING_MM;
        cursor.text_colored(
            title,
            x + BOX_PADDING_MM,
            baseline(y, BOX_TITLE_PT),
            BOX_TITLE_PT,
            FontWeight::Bold,
            TextAlign::Left,
            BORDER_PRIMARY,
        );
        y += title_step;

        let value_width = box_width - BOX_PADDING_MM * 2.0 - INFO_LABEL_WIDTH_MM;
        for (label, value) in rows {
            let line = baseline(y, BODY_PT);
            cursor.text(*label, x + BOX_PADDING_MM, line, BODY_PT, FontWeight::Bold, TextAlign::Left);
            cursor.text(
                fit_text(value, value_width, BODY_PT),
                x + BOX_PADDING_MM + INFO_LABEL_WIDTH_MM,
                line,
                BODY_PT,
                FontWeight::Regular,
                TextAlign::Left,
            );
            y += row_step;
        }
    }

    if let Some(seal) = doc
        .supplier
        .seal_image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        cursor.push(DrawOp::Image {
            x: supplier_x + box_width - BOX_PADDING_MM - SEAL_SIZE_MM,
            y: top + BOX_PADDING_MM + title_step - 4.0,
            width: SEAL_SIZE_MM,
            height: SEAL_SIZE_MM,
            source: seal.to_string(),
        });
    }

    cursor.y = top + height + SECTION_GAP_MM;
}

/// Column widths scaled to the content width.
pub fn scaled_column_widths() -> [f32; 6] {
    let total: f32 = COLUMN_WIDTHS_MM.iter().sum();
    COLUMN_WIDTHS_MM.map(|w| w / total * CONTENT_WIDTH_MM)
}

fn table_row_height() -> f32 {
    CELL_PAD_Y_MM * 2.0 + line_height(BODY_PT)
}

/// Draws one table row; `cells` are `(text, align)` per column.
fn layout_row(
    cursor: &mut PageCursor,
    cells: [(String, TextAlign); 6],
    fill: Option<Rgb>,
    weight: FontWeight,
) {
    let widths = scaled_column_widths();
    let height = table_row_height();
    let top = cursor.y;

    cursor.push(DrawOp::Rect {
        x: PAGE_PADDING_MM,
        y: top,
        width: CONTENT_WIDTH_MM,
        height,
        fill,
        stroke: Some(BORDER_PRIMARY),
    });

    let mut x = PAGE_PADDING_MM;
    for (index, ((text, align), width)) in cells.into_iter().zip(widths).enumerate() {
        if index > 0 {
            cursor.push(DrawOp::Line {
                from: (x, top),
                to: (x, top + height),
                color: BORDER_PRIMARY,
            });
        }
        if !text.is_empty() {
            let inner = width - CELL_PAD_X_MM * 2.0;
            let anchor = match align {
                TextAlign::Left => x + CELL_PAD_X_MM,
                TextAlign::Center => x + width / 2.0,
                TextAlign::Right => x + width - CELL_PAD_X_MM,
            };
            cursor.text(
                fit_text(&text, inner, BODY_PT),
                anchor,
                baseline(top + CELL_PAD_Y_MM, BODY_PT),
                BODY_PT,
                weight,
                align,
            );
        }
        x += width;
    }

    cursor.y += height;
}

fn layout_header_row(cursor: &mut PageCursor) {
    let cells = TABLE_HEADERS.map(|h| (h.to_string(), TextAlign::Center));
    layout_row(cursor, cells, Some(HEADER_FILL), FontWeight::Bold);
}

fn layout_table<B>(cursor: &mut PageCursor, doc: &FinancialDocument<B>) {
    let row_height = table_row_height();

    if cursor.remaining() < row_height * 2.0 {
        cursor.new_page();
    }
    layout_header_row(cursor);

    for item in &doc.items {
        if cursor.remaining() < row_height {
            cursor.new_page();
            layout_header_row(cursor);
        }
        let cells = [
            (item.no.to_string(), TextAlign::Center),
            (item.product_name.clone(), TextAlign::Left),
            (group_thousands(item.quantity), TextAlign::Center),
            (won(item.unit_price.won()), TextAlign::Right),
            (won(item.amount.won()), TextAlign::Right),
            (item.note.clone(), TextAlign::Left),
        ];
        layout_row(cursor, cells, None, FontWeight::Regular);
    }

    if cursor.remaining() < row_height {
        cursor.new_page();
    }
    let totals = [
        ("합계".to_string(), TextAlign::Center),
        (String::new(), TextAlign::Left),
        (String::new(), TextAlign::Left),
        (String::new(), TextAlign::Left),
        (won(doc.total_amount.won()), TextAlign::Right),
        (String::new(), TextAlign::Left),
    ];
    layout_row(cursor, totals, None, FontWeight::Regular);

    cursor.y += SECTION_GAP_MM;
}

fn layout_totals<B>(cursor: &mut PageCursor, doc: &FinancialDocument<B>) {
    let step = line_height(BODY_PT) + TOTALS_LINE_GAP_MM;
    let height = BOX_PADDING_MM * 2.0 + step * 3.0 - TOTALS_LINE_GAP_MM;
    if cursor.remaining() < height {
        cursor.new_page();
    }

    let top = cursor.y;
    cursor.bordered_box(PAGE_PADDING_MM, top, CONTENT_WIDTH_MM, height);

    let lines = [
        ("공급가액: ", doc.total_amount.won()),
        ("부가세(10%): ", doc.tax.won()),
        ("합계금액: ", doc.final_amount.won()),
    ];

    let x = PAGE_PADDING_MM + BOX_PADDING_MM;
    let mut y = top + BOX_PADDING_MM;
    for (label, value) in lines {
        let line = baseline(y, BODY_PT);
        cursor.text(label, x, line, BODY_PT, FontWeight::Bold, TextAlign::Left);
        cursor.text(
            won(value),
            x + estimate_text_width_mm(label, BODY_PT),
            line,
            BODY_PT,
            FontWeight::Regular,
            TextAlign::Left,
        );
        y += step;
    }

    cursor.y = top + height + SECTION_GAP_MM;
}

fn layout_account_footer(cursor: &mut PageCursor, account_number: &str) {
    let step = line_height(BODY_PT) + INFO_LINE_GAP_MM;
    let height = BOX_PADDING_MM * 2.0 + step + line_height(BODY_PT);
    if cursor.remaining() < height {
        cursor.new_page();
    }

    let top = cursor.y;
    cursor.bordered_box(PAGE_PADDING_MM, top, CONTENT_WIDTH_MM, height);

    let x = PAGE_PADDING_MM + BOX_PADDING_MM;
    let y = top + BOX_PADDING_MM;
    cursor.text("입금 계좌", x, baseline(y, BODY_PT), BODY_PT, FontWeight::Bold, TextAlign::Left);
    cursor.text(
        account_number,
        x,
        baseline(y + step, BODY_PT),
        BODY_PT,
        FontWeight::Regular,
        TextAlign::Left,
    );

    cursor.y = top + height;
}

// =============================================================================
// Unit Tests
// =============================================================================
