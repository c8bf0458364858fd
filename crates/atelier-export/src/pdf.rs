//! # PDF Renderer
//!
//! Paints a [`PageLayout`] with printpdf.
//!
//! ## Coordinates
//! ```text
//!   layout (mm)                 printpdf (mm)
//!   0 ┌──────────┐ top          297 ┌──────────┐
//!     │  y ↓     │                  │  y ↑     │
//! 297 └──────────┘ bottom         0 └──────────┘
//!
//!   y_pdf = 297 - y_layout
//! ```
//!
//! ## Fonts
//! Hangul needs a TrueType font with Korean glyphs (e.g. NanumGothic).
//! Without one configured the builtin Helvetica faces are used and Korean
//! text will not render legibly; a warning is logged once per renderer.
//!
//! ## Seal
//! The seal reference may be a `data:image/...;base64,` URL or a file path.
//! Relative and root-anchored paths (`/stamp.png`) resolve against the asset
//! directory. An unreadable seal is omitted with a warning.

use base64::Engine;
use image::RgbaImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
    Polygon, Px,
};
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use atelier_core::{FinancialDocument, Party};

use crate::error::{ExportError, ExportResult};
use crate::layout::{
    layout_document, DrawOp, FontWeight, PageLayout, Rgb, TextOp, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;
const STROKE_WIDTH_PT: f32 = 0.75;

/// Font files used for PDF text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontConfig {
    /// Regular face; a font with Hangul glyphs.
    pub regular: Option<PathBuf>,
    /// Bold face; falls back to `regular`.
    pub bold: Option<PathBuf>,
}

/// Renders layouts to PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
    asset_dir: Option<PathBuf>,
}

impl PdfRenderer {
    /// Renderer using the builtin Helvetica faces.
    pub fn builtin() -> Self {
        PdfRenderer::default()
    }

    /// Loads the configured font files. A font that cannot be read is
    /// logged and replaced by the builtin face.
    pub fn from_config(fonts: &FontConfig, asset_dir: Option<PathBuf>) -> Self {
        let regular = fonts.regular.as_deref().and_then(read_font_logged);
        let bold = fonts.bold.as_deref().and_then(read_font_logged);

        if regular.is_none() {
            warn!("No Korean font configured for PDF output, Hangul text will not render");
        }

        PdfRenderer {
            regular,
            bold,
            asset_dir,
        }
    }

    /// Directory used to resolve relative seal paths.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    pub fn has_external_font(&self) -> bool {
        self.regular.is_some()
    }

    /// Lays out and renders one statement or quote.
    pub fn render<B: Party>(&self, doc: &FinancialDocument<B>) -> ExportResult<Vec<u8>> {
        self.render_layout(&layout_document(doc))
    }

    /// Renders a prepared layout.
    pub fn render_layout(&self, layout: &PageLayout) -> ExportResult<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            layout.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let fonts = self.load_fonts(&doc)?;

        for (index, page) in layout.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_ref, layer_ref) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                doc.get_page(page_ref).get_layer(layer_ref)
            };
            layer.set_outline_thickness(STROKE_WIDTH_PT);

            for op in &page.ops {
                self.draw(&layer, &fonts, op);
            }
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        debug!(
            title = %layout.title,
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "PDF rendered"
        );
        Ok(bytes)
    }

    fn load_fonts(&self, doc: &PdfDocumentReference) -> ExportResult<Fonts> {
        match &self.regular {
            Some(regular) => {
                let regular_ref = doc.add_external_font(Cursor::new(regular.clone()))?;
                let bold_ref = match &self.bold {
                    Some(bold) => doc.add_external_font(Cursor::new(bold.clone()))?,
                    None => regular_ref.clone(),
                };
                Ok(Fonts {
                    regular: regular_ref,
                    bold: bold_ref,
                })
            }
            None => Ok(Fonts {
                regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
                bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            }),
        }
    }

    fn draw(&self, layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
        match op {
            DrawOp::Text(text) => draw_text(layer, fonts, text),
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => draw_rect(layer, *x, *y, *width, *height, *fill, *stroke),
            DrawOp::Line { from, to, color } => {
                layer.set_outline_color(pdf_color(*color));
                layer.add_line(Line {
                    points: vec![
                        (point(from.0, from.1), false),
                        (point(to.0, to.1), false),
                    ],
                    is_closed: false,
                });
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                source,
            } => match self.load_seal(source) {
                Ok(seal) => draw_image(layer, &seal, *x, *y, *width, *height),
                Err(e) => warn!(error = %e, "Seal image omitted from PDF"),
            },
        }
    }

    /// Resolves and decodes a seal reference.
    pub fn load_seal(&self, source: &str) -> ExportResult<RgbaImage> {
        let bytes = if source.starts_with("data:") {
            decode_data_url(source)?
        } else {
            let path = self
                .resolve_asset(source)
                .ok_or_else(|| ExportError::Seal(format!("file not found: {source}")))?;
            std::fs::read(&path)?
        };

        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }

    fn resolve_asset(&self, source: &str) -> Option<PathBuf> {
        let direct = Path::new(source);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        let dir = self.asset_dir.as_ref()?;
        let joined = dir.join(source.trim_start_matches('/'));
        joined.is_file().then_some(joined)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn read_font_logged(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            let err = ExportError::Font {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
            warn!(error = %err, "Falling back to builtin PDF font");
            None
        }
    }
}

/// Decodes the payload of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> ExportResult<Vec<u8>> {
    let (header, payload) = url
        .split_once(',')
        .ok_or_else(|| ExportError::Seal("malformed data URL".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ExportError::Seal("data URL is not base64".to_string()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ExportError::Seal(e.to_string()))
}

/// Flattens RGBA onto a white background.
pub fn composite_on_white(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity((image.width() * image.height() * 3) as usize);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
            out.push(blended as u8);
        }
    }
    out
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - y))
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, text: &TextOp) {
    let font = match text.weight {
        FontWeight::Regular => &fonts.regular,
        FontWeight::Bold => &fonts.bold,
    };
    layer.set_fill_color(pdf_color(text.color));
    layer.use_text(
        text.text.as_str(),
        text.size_pt,
        Mm(text.left_x()),
        Mm(PAGE_HEIGHT_MM - text.y),
        font,
    );
}

fn draw_rect(
    layer: &PdfLayerReference,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Option<Rgb>,
    stroke: Option<Rgb>,
) {
    let corners = vec![
        (point(x, y), false),
        (point(x + width, y), false),
        (point(x + width, y + height), false),
        (point(x, y + height), false),
    ];

    if let Some(fill) = fill {
        layer.set_fill_color(pdf_color(fill));
        layer.add_polygon(Polygon {
            rings: vec![corners.clone()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }
    if let Some(stroke) = stroke {
        layer.set_outline_color(pdf_color(stroke));
        layer.add_line(Line {
            points: corners,
            is_closed: true,
        });
    }
}

fn draw_image(layer: &PdfLayerReference, image: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
    let (px_w, px_h) = image.dimensions();
    if px_w == 0 || px_h == 0 {
        return;
    }

    let xobject = ImageXObject {
        width: Px(px_w as usize),
        height: Px(px_h as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: composite_on_white(image),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    };

    let natural_w = px_w as f32 / IMAGE_DPI * MM_PER_INCH;
    let natural_h = px_h as f32 / IMAGE_DPI * MM_PER_INCH;

    Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - y - height)),
            scale_x: Some(width / natural_w),
            scale_y: Some(height / natural_h),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

// =============================================================================
// Unit Tests
// =============================================================================
