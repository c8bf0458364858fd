//! # Capture Font
//!
//! TrueType text for the PNG snapshot, drawn with `ab_glyph`.
//!
//! The snapshot reuses the regular face configured for PDF output, so the
//! same Korean font covers both. Sizes are pixel heights: a 14 px line
//! spans ascent to descent.
//!
//! ```text
//!   top ─────────────────┬──────────
//!                        │ ascent
//!   baseline ── 작업 현황 ┼──────────   pen advances by h_advance per glyph
//!                        │ descent
//!   top + size ──────────┴──────────
//! ```

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::fmt;
use std::path::Path;
use tracing::warn;

use crate::error::{ExportError, ExportResult};
use crate::pdf::FontConfig;

/// Parsed font used to paint snapshot text.
pub struct CaptureFont {
    font: FontVec,
}

impl fmt::Debug for CaptureFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureFont").finish_non_exhaustive()
    }
}

impl CaptureFont {
    pub fn from_bytes(bytes: Vec<u8>, origin: &Path) -> ExportResult<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|e| ExportError::Font {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(CaptureFont { font })
    }

    pub fn from_file(path: &Path) -> ExportResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| ExportError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes, path)
    }

    /// Loads the configured regular face. `None` (with a warning) when no
    /// face is configured or it cannot be parsed.
    pub fn from_config(fonts: &FontConfig) -> Option<Self> {
        let Some(path) = fonts.regular.as_deref() else {
            warn!("No font configured for snapshots, text will be left out of captures");
            return None;
        };
        match Self::from_file(path) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!(error = %e, "Snapshot font unavailable, text will be left out of captures");
                None
            }
        }
    }

    /// Advance width of `text` at `size` px.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        text.chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .sum()
    }

    /// Rasterizes `text` with its top-left corner at `(x, y)` in device
    /// pixels. `plot` receives device coordinates and a 0..=1 coverage.
    pub fn draw(&self, x: f32, y: f32, text: &str, size: f32, mut plot: impl FnMut(i64, i64, f32)) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = y + scaled.ascent();

        let mut pen = x;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            let glyph = id.with_scale_and_position(scale, point(pen, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                outlined.draw(|gx, gy, coverage| {
                    plot(left + i64::from(gx), top + i64::from(gy), coverage);
                });
            }
            pen += scaled.h_advance(id);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal TrueType builder.
    //!
    //! Glyph `n` (1-based, in the order of `chars`) is a solid bar from
    //! x = 100 to x = 100 + 100·n font units, 700 units tall, so every
    //! character paints a different shape. 1000 units per em, ascent 800,
    //! descent -200.

    fn be16(out: &mut Vec<u8>, value: u16) {
        out.extend_from_slice(&value.to_be_bytes());
    }

    fn be32(out: &mut Vec<u8>, value: u32) {
        out.extend_from_slice(&value.to_be_bytes());
    }

    fn bar_glyph(n: u16) -> Vec<u8> {
        let (x0, x1, top) = (100i16, 100 + 100 * n as i16, 700i16);
        let mut g = Vec::new();
        for v in [1i16, x0, 0, x1, top] {
            g.extend_from_slice(&v.to_be_bytes());
        }
        be16(&mut g, 3); // last point of the only contour
        be16(&mut g, 0); // no instructions
        g.extend_from_slice(&[0x01; 4]); // on-curve, 16-bit deltas
        // clockwise: bottom-left, top-left, top-right, bottom-right
        for dx in [x0, 0, x1 - x0, 0] {
            g.extend_from_slice(&dx.to_be_bytes());
        }
        for dy in [0i16, top, 0, -top] {
            g.extend_from_slice(&dy.to_be_bytes());
        }
        g.resize(36, 0);
        g
    }

    pub fn font_with_glyphs(chars: &str) -> Vec<u8> {
        let chars: Vec<char> = chars.chars().collect();
        let num_glyphs = chars.len() as u16 + 1;

        let mut glyf = Vec::new();
        let mut loca = Vec::new();
        be32(&mut loca, 0);
        be32(&mut loca, 0); // glyph 0 has no outline
        for n in 1..num_glyphs {
            glyf.extend(bar_glyph(n));
            be32(&mut loca, glyf.len() as u32);
        }

        let mut hmtx = Vec::new();
        for n in 0..num_glyphs {
            be16(&mut hmtx, 1000);
            be16(&mut hmtx, if n == 0 { 0 } else { 100 });
        }

        let mut mapping: Vec<(u32, u32)> = chars
            .iter()
            .enumerate()
            .map(|(i, ch)| (*ch as u32, i as u32 + 1))
            .collect();
        mapping.sort();
        mapping.dedup_by_key(|(code, _)| *code);

        let mut cmap = Vec::new();
        be16(&mut cmap, 0);
        be16(&mut cmap, 1);
        be16(&mut cmap, 0); // Unicode platform
        be16(&mut cmap, 4); // full repertoire
        be32(&mut cmap, 12);
        be16(&mut cmap, 12); // segmented coverage
        be16(&mut cmap, 0);
        be32(&mut cmap, 16 + 12 * mapping.len() as u32);
        be32(&mut cmap, 0);
        be32(&mut cmap, mapping.len() as u32);
        for (code, glyph) in &mapping {
            be32(&mut cmap, *code);
            be32(&mut cmap, *code);
            be32(&mut cmap, *glyph);
        }

        let mut head = Vec::new();
        be32(&mut head, 0x0001_0000);
        be32(&mut head, 0x0001_0000);
        be32(&mut head, 0);
        be32(&mut head, 0x5F0F_3CF5);
        be16(&mut head, 0);
        be16(&mut head, 1000); // units per em
        head.extend_from_slice(&[0; 16]); // created, modified
        for v in [0i16, 0, 1000, 700] {
            head.extend_from_slice(&v.to_be_bytes());
        }
        be16(&mut head, 0);
        be16(&mut head, 8);
        be16(&mut head, 2);
        be16(&mut head, 1); // long loca offsets
        be16(&mut head, 0);

        let mut hhea = Vec::new();
        be32(&mut hhea, 0x0001_0000);
        for v in [800i16, -200, 0] {
            hhea.extend_from_slice(&v.to_be_bytes());
        }
        be16(&mut hhea, 1000);
        for v in [0i16, 0, 1000, 1, 0, 0, 0, 0, 0, 0, 0] {
            hhea.extend_from_slice(&v.to_be_bytes());
        }
        be16(&mut hhea, num_glyphs);

        let mut maxp = Vec::new();
        be32(&mut maxp, 0x0000_5000);
        be16(&mut maxp, num_glyphs);

        // Table records must be sorted by tag.
        let tables: [(&[u8; 4], Vec<u8>); 7] = [
            (b"cmap", cmap),
            (b"glyf", glyf),
            (b"head", head),
            (b"hhea", hhea),
            (b"hmtx", hmtx),
            (b"loca", loca),
            (b"maxp", maxp),
        ];

        let mut font = Vec::new();
        be32(&mut font, 0x0001_0000);
        be16(&mut font, tables.len() as u16);
        be16(&mut font, 64);
        be16(&mut font, 2);
        be16(&mut font, 48);

        let mut offset = 12 + 16 * tables.len() as u32;
        let mut body = Vec::new();
        for (tag, data) in &tables {
            font.extend_from_slice(*tag);
            be32(&mut font, 0);
            be32(&mut font, offset);
            be32(&mut font, data.len() as u32);

            body.extend_from_slice(data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
            offset = 12 + 16 * tables.len() as u32 + body.len() as u32;
        }
        font.extend(body);
        font
    }
}

#[cfg(test)]
mod tests {
    use super::testing::font_with_glyphs;
    use super::*;
    use std::collections::HashSet;

    fn font(chars: &str) -> CaptureFont {
        CaptureFont::from_bytes(font_with_glyphs(chars), Path::new("test.ttf")).unwrap()
    }

    #[test]
    fn test_text_width_uses_advances() {
        let font = font("가나");
        // 1000-unit advance at 20 px per 1000-unit line height
        assert!((font.text_width("가나", 20.0) - 40.0).abs() < 0.01);
        assert_eq!(font.text_width("", 20.0), 0.0);
    }

    #[test]
    fn test_distinct_glyphs_cover_distinct_pixels() {
        let font = font("가나");
        let covered = |text: &str| {
            let mut pixels = HashSet::new();
            font.draw(0.0, 0.0, text, 20.0, |x, y, c| {
                if c > 0.5 {
                    pixels.insert((x, y));
                }
            });
            pixels
        };

        let ga = covered("가");
        let na = covered("나");
        assert!(!ga.is_empty());
        assert!(na.len() > ga.len());
        // bar starts 2 px in and reaches from the baseline (16) to 14 px above it
        assert!(ga.contains(&(2, 10)));
        assert!(!ga.contains(&(0, 10)));
    }

    #[test]
    fn test_unparseable_font_is_error() {
        let err = CaptureFont::from_bytes(vec![0; 16], Path::new("broken.ttf")).unwrap_err();
        assert!(matches!(err, ExportError::Font { .. }));
    }

    #[test]
    fn test_from_config_without_font() {
        assert!(CaptureFont::from_config(&FontConfig::default()).is_none());
    }
}
