use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont, point};
use image::GrayImage;

use crate::foundation::error::{ThumbError, ThumbResult};

/// A loaded font face. Cheap to clone and safe to share across threads.
#[derive(Clone, Debug)]
pub struct FontAsset {
    font: FontArc,
    label: String,
}

/// Exact (unrounded) ink bounds of a rendered line relative to its pen origin on the baseline.
/// `y` grows downwards, so `min_y` is usually negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl InkBox {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    fn union(self, other: InkBox) -> InkBox {
        InkBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl FontAsset {
    /// Load a TrueType/OpenType font from disk.
    ///
    /// There is no fallback face: a missing font would silently change every layout.
    pub fn load(path: &Path) -> ThumbResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ThumbError::font(format!("cannot read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, path.display().to_string())
    }

    pub fn from_bytes(bytes: Vec<u8>, label: impl Into<String>) -> ThumbResult<Self> {
        let label = label.into();
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| ThumbError::font(format!("invalid font data in '{label}': {e}")))?;
        Ok(Self { font, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn glyphs(&self, text: &str, size: f32) -> Vec<Glyph> {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);

        let mut out = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            out.push(id.with_scale_and_position(scale, point(caret, 0.0)));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        out
    }

    /// Ink bounds of `text` set on one line at `size` px. `None` when nothing is drawn
    /// (empty string, whitespace only).
    pub fn ink_box(&self, text: &str, size: f32) -> Option<InkBox> {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let (h, v) = (scaled.h_scale_factor(), scaled.v_scale_factor());

        self.glyphs(text, size)
            .iter()
            .filter_map(|g| {
                let outline = self.font.outline(g.id)?;
                // Outline bounds are unscaled and y-up with min/max y already swapped.
                let b = outline.bounds;
                Some(InkBox {
                    min_x: b.min.x * h + g.position.x,
                    min_y: -b.min.y * v + g.position.y,
                    max_x: b.max.x * h + g.position.x,
                    max_y: -b.max.y * v + g.position.y,
                })
            })
            .reduce(InkBox::union)
    }

    /// Rasterize `text` with its pen origin at `origin` into `mask` (max-combined coverage).
    pub fn draw_line(&self, text: &str, size: f32, origin: (f32, f32), mask: &mut GrayImage) {
        let (w, h) = (mask.width() as i64, mask.height() as i64);
        for mut glyph in self.glyphs(text, size) {
            glyph.position.x += origin.0;
            glyph.position.y += origin.1;
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i64 + i64::from(px);
                let y = bounds.min.y as i64 + i64::from(py);
                if x < 0 || y < 0 || x >= w || y >= h {
                    return;
                }
                let c = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let dst = mask.get_pixel_mut(x as u32, y as u32);
                dst.0[0] = dst.0[0].max(c);
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
