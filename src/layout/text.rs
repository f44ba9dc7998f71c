use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::{
    assets::font::{FontAsset, InkBox},
    foundation::core::{Canvas, Pos},
    foundation::error::{ThumbError, ThumbResult},
};

/// The two-line title stamped onto every thumbnail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub line1: String,
    pub line2: String,
    /// Pixel size of line 1; line 2 is resized to match its width.
    pub base_size: f32,
    /// Vertical gap between the two lines' ink boxes.
    pub spacing: i32,
}

impl TextBlock {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
            base_size: 200.0,
            spacing: 10,
        }
    }
}

/// Size and ink extents of one measured line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMetrics {
    pub text: String,
    pub size: f32,
    /// Ink box relative to the pen origin, `None` for lines without visible glyphs.
    pub ink: Option<InkBox>,
}

impl LineMetrics {
    fn measure(font: &FontAsset, text: &str, size: f32) -> Self {
        Self {
            text: text.to_owned(),
            size,
            ink: font.ink_box(text, size),
        }
    }

    pub fn width(&self) -> u32 {
        self.ink.map_or(0, |i| i.width().round().max(0.0) as u32)
    }

    pub fn height(&self) -> u32 {
        self.ink.map_or(0, |i| i.height().round().max(0.0) as u32)
    }
}

/// Canvas-independent measurement of a [`TextBlock`]: computed once per (font, text) and
/// placed onto any number of canvases.
#[derive(Clone, Debug)]
pub struct TextMetrics {
    font: FontAsset,
    spacing: i32,
    lines: [LineMetrics; 2],
}

impl TextMetrics {
    /// Measure both lines, scaling line 2 so its ink width equals line 1's.
    pub fn measure(font: &FontAsset, block: &TextBlock) -> ThumbResult<Self> {
        if !block.base_size.is_finite() || block.base_size <= 0.0 {
            return Err(ThumbError::config("base font size must be finite and > 0"));
        }

        let line1 = LineMetrics::measure(font, &block.line1, block.base_size);
        let at_base = LineMetrics::measure(font, &block.line2, block.base_size);

        let w1 = line1.ink.map_or(0.0, |i| i.width());
        let w2 = at_base.ink.map_or(0.0, |i| i.width());
        let scale = if w2 > 0.0 && w1 > 0.0 { w1 / w2 } else { 1.0 };
        let line2 = if scale == 1.0 {
            at_base
        } else {
            LineMetrics::measure(font, &block.line2, block.base_size * scale)
        };

        tracing::debug!(
            size1 = line1.size,
            size2 = line2.size,
            width1 = line1.width(),
            width2 = line2.width(),
            "measured title lines"
        );

        Ok(Self {
            font: font.clone(),
            spacing: block.spacing,
            lines: [line1, line2],
        })
    }

    pub fn lines(&self) -> &[LineMetrics; 2] {
        &self.lines
    }

    /// Center the two-line block inside `canvas`.
    pub fn place(&self, canvas: Canvas) -> Layout {
        let [l1, l2] = &self.lines;
        let (w1, h1, h2) = (l1.width() as i32, l1.height() as i32, l2.height() as i32);
        let block_height = h1 + self.spacing + h2;

        let x = (canvas.width as i32 - w1).div_euclid(2);
        let y = (canvas.height as i32 - block_height).div_euclid(2);
        let pos1 = Pos::new(x, y);
        let pos2 = Pos::new(x, y + h1 + self.spacing);

        Layout {
            canvas,
            metrics: self.clone(),
            positions: [pos1, pos2],
        }
    }
}

/// Resolved positions of both title lines on one canvas.
///
/// Every effect of a recipe renders through the same `Layout`, so all of them agree on
/// where the glyphs are.
#[derive(Clone, Debug)]
pub struct Layout {
    canvas: Canvas,
    metrics: TextMetrics,
    positions: [Pos; 2],
}

impl Layout {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Top-left corners of each line's ink box.
    pub fn positions(&self) -> [Pos; 2] {
        self.positions
    }

    pub fn lines(&self) -> &[LineMetrics; 2] {
        &self.metrics.lines
    }

    /// Coverage mask of both lines translated by `offset`.
    pub fn silhouette(&self, offset: Pos) -> GrayImage {
        let mut mask = GrayImage::new(self.canvas.width, self.canvas.height);
        for (line, pos) in self.metrics.lines.iter().zip(self.positions) {
            let Some(ink) = line.ink else {
                continue;
            };
            let pos = pos.offset(offset);
            let origin = (pos.x as f32 - ink.min_x, pos.y as f32 - ink.min_y);
            self.metrics
                .font
                .draw_line(&line.text, line.size, origin, &mut mask);
        }
        mask
    }
}

/// One-shot convenience: measure `block` with `font` and center it on `canvas`.
pub fn resolve_layout(font: &FontAsset, block: &TextBlock, canvas: Canvas) -> ThumbResult<Layout> {
    Ok(TextMetrics::measure(font, block)?.place(canvas))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
