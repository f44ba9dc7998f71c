//! Effect primitives. Every function returns a fresh canvas-sized [`Layer`]; none of them
//! touch the base image.

use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{
    effects::composite::{BlendOp, blend_in_place},
    effects::layer::{Layer, blurred_mask},
    foundation::core::{Canvas, Pos, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
    foundation::math::{Rng64, mul_div255_u8},
    layout::text::Layout,
};

/// Relief kernel: light from the top-left, shade to the bottom-right. Sums to 1.
pub const EMBOSS_KERNEL: [i32; 9] = [-1, -1, 0, -1, 1, 1, 0, 1, 1];

/// Both title lines rasterized once at their resolved positions.
///
/// Effects that need the glyphs at an offset shift this mask by whole pixels instead of
/// rasterizing again; integer shifts yield identical coverage.
#[derive(Clone, Debug)]
pub struct TextStamp<'a> {
    layout: &'a Layout,
    mask: GrayImage,
}

impl<'a> TextStamp<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            mask: layout.silhouette(Pos::ZERO),
        }
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    pub fn canvas(&self) -> Canvas {
        self.layout.canvas()
    }

    /// Silhouette of both lines shifted by `offset`.
    pub fn mask_at(&self, offset: Pos) -> GrayImage {
        shift_mask(&self.mask, offset)
    }
}

/// Stroke coloring for [`outline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokePaint {
    Solid(Rgba8),
    /// `even` where `(dx + dy)` is even, `odd` elsewhere.
    Alternating { even: Rgba8, odd: Rgba8 },
}

impl StrokePaint {
    fn color_at(self, dx: i32, dy: i32) -> Rgba8 {
        match self {
            StrokePaint::Solid(c) => c,
            StrokePaint::Alternating { even, odd } => {
                if (dx + dy).rem_euclid(2) == 0 {
                    even
                } else {
                    odd
                }
            }
        }
    }
}

/// One concentric disk of a flare spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlareRing {
    pub radius: u32,
    pub alpha: u8,
}

pub fn text_layer(stamp: &TextStamp<'_>, color: Rgba8, offset: Pos) -> Layer {
    Layer::from_mask(&stamp.mask_at(offset), color)
}

/// Text in `color`, blurred by `sigma`, then moved by `offset`.
pub fn shadow(stamp: &TextStamp<'_>, color: Rgba8, offset: Pos, sigma: f32) -> ThumbResult<Layer> {
    let layer = text_layer(stamp, color, Pos::ZERO).blurred(sigma)?;
    Ok(layer.translated(offset))
}

/// Alpha-over union of the text stamped at every offset in `[-r, r]²` except the origin.
///
/// Offsets are visited with `dx` outer and `dy` inner, so later stamps sit on top.
pub fn outline(stamp: &TextStamp<'_>, paint: StrokePaint, radius: u32) -> ThumbResult<Layer> {
    let mut out = Layer::transparent(stamp.canvas());
    let r = i32::try_from(radius).map_err(|_| ThumbError::validation("outline radius too large"))?;
    for dx in -r..=r {
        for dy in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            let layer = text_layer(stamp, paint.color_at(dx, dy), Pos::new(dx, dy));
            blend_in_place(&mut out, &layer, BlendOp::Over)?;
        }
    }
    Ok(out)
}

/// Constant `color` whose alpha follows the blurred text silhouette.
pub fn glow(stamp: &TextStamp<'_>, color: Rgba8, sigma: f32) -> ThumbResult<Layer> {
    let mask = blurred_mask(&stamp.mask_at(Pos::ZERO), sigma)?;
    Ok(Layer::from_mask(&mask, color))
}

/// Vertical `top` to `bottom` interpolation over the full canvas height, cut to the glyphs.
pub fn gradient_fill(stamp: &TextStamp<'_>, top: Rgba8, bottom: Rgba8) -> Layer {
    let height = stamp.canvas().height as f32;
    let rows: Vec<Rgba8> = (0..stamp.canvas().height)
        .map(|y| top.lerp(bottom, y as f32 / height))
        .collect();
    Layer::from_mask_with(&stamp.mask_at(Pos::ZERO), |_, y| rows[y as usize])
}

/// Parameters of the stochastic dot grid used by [`pattern_fill`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DotPattern {
    /// Grid pitch in pixels.
    pub cell: u32,
    /// Dot diameter in pixels.
    pub dot: u32,
    /// Probability that a cell gets a dot.
    pub density: f64,
}

impl Default for DotPattern {
    fn default() -> Self {
        Self {
            cell: 6,
            dot: 3,
            density: 0.5,
        }
    }
}

/// Dots of `color` scattered on a grid and intersected with the glyphs.
pub fn pattern_fill(
    stamp: &TextStamp<'_>,
    color: Rgba8,
    pattern: DotPattern,
    seed: u64,
) -> ThumbResult<Layer> {
    if pattern.cell == 0 || pattern.dot == 0 {
        return Err(ThumbError::validation("pattern cell and dot must be > 0"));
    }
    if !(0.0..=1.0).contains(&pattern.density) {
        return Err(ThumbError::validation("pattern density must be in 0..=1"));
    }

    let canvas = stamp.canvas();
    let dots = dot_grid(canvas, pattern, seed);
    let mut mask = stamp.mask_at(Pos::ZERO);
    for (m, d) in mask.pixels_mut().zip(dots.pixels()) {
        m.0[0] = mul_div255_u8(u16::from(m.0[0]), u16::from(d.0[0]));
    }
    Ok(Layer::from_mask(&mask, color))
}

fn dot_grid(canvas: Canvas, pattern: DotPattern, seed: u64) -> GrayImage {
    let mut grid = GrayImage::new(canvas.width, canvas.height);
    let mut rng = Rng64::new(seed);
    let r = pattern.dot as f32 / 2.0;
    for x in (0..canvas.width).step_by(pattern.cell as usize) {
        for y in (0..canvas.height).step_by(pattern.cell as usize) {
            if rng.next_f64_01() >= pattern.density {
                continue;
            }
            for j in 0..pattern.dot {
                for i in 0..pattern.dot {
                    let (px, py) = (x + i, y + j);
                    if px >= canvas.width || py >= canvas.height {
                        continue;
                    }
                    let nx = (i as f32 + 0.5 - r) / r;
                    let ny = (j as f32 + 0.5 - r) / r;
                    if nx * nx + ny * ny <= 1.0 {
                        grid.put_pixel(px, py, image::Luma([255]));
                    }
                }
            }
        }
    }
    grid
}

/// Radial metallic fill: `dark` at the canvas center, `light` at the edges.
pub fn foil(stamp: &TextStamp<'_>, dark: Rgba8, light: Rgba8) -> Layer {
    let canvas = stamp.canvas();
    let (hw, hh) = (canvas.width as f32 / 2.0, canvas.height as f32 / 2.0);
    Layer::from_mask_with(&stamp.mask_at(Pos::ZERO), |x, y| {
        let nx = (x as f32 + 0.5 - hw) / hw;
        let ny = (y as f32 + 0.5 - hh) / hh;
        let t = (nx * nx + ny * ny).sqrt().min(1.0);
        dark.lerp(light, t)
    })
}

/// Faint text render convolved with a 3x3 `kernel` to fake relief.
///
/// The convolution runs on straight RGBA, clamping at the canvas edge.
pub fn emboss(stamp: &TextStamp<'_>, color: Rgba8, kernel: [i32; 9]) -> Layer {
    let mask = stamp.mask_at(Pos::ZERO);
    let (w, h) = mask.dimensions();
    let straight = RgbaImage::from_fn(w, h, |x, y| {
        let cov = mask.get_pixel(x, y).0[0];
        if cov == 0 {
            return image::Rgba([0; 4]);
        }
        let a = mul_div255_u8(u16::from(color.a), u16::from(cov));
        image::Rgba([color.r, color.g, color.b, a])
    });

    let sample = |x: i64, y: i64| -> [u8; 4] {
        let cx = x.clamp(0, i64::from(w) - 1) as u32;
        let cy = y.clamp(0, i64::from(h) - 1) as u32;
        straight.get_pixel(cx, cy).0
    };
    let premul = RgbaImage::from_fn(w, h, |x, y| {
        let mut acc = [0i32; 4];
        for (k, &weight) in kernel.iter().enumerate() {
            if weight == 0 {
                continue;
            }
            let px = sample(i64::from(x) + (k % 3) as i64 - 1, i64::from(y) + (k / 3) as i64 - 1);
            for (a, v) in acc.iter_mut().zip(px) {
                *a += weight * i32::from(v);
            }
        }
        let [r, g, b, a] = acc.map(|v| v.clamp(0, 255) as u8);
        image::Rgba(Rgba8::new(r, g, b, a).to_premul())
    });
    Layer::from_premul(premul)
}

/// Soft white light spots at the start of line 1 and the end of line 2.
///
/// Rings are painted in the order given and each replaces what is below it, so a ring
/// listed after a smaller one hides it.
pub fn flare(stamp: &TextStamp<'_>, rings: &[FlareRing], sigma: f32) -> ThumbResult<Layer> {
    let layout = stamp.layout();
    let [pos1, pos2] = layout.positions();
    let line2_width = layout.lines()[1].width() as i32;
    let points = [pos1, Pos::new(pos2.x + line2_width, pos2.y)];

    let canvas = stamp.canvas();
    let mut layer = Layer::transparent(canvas);
    let img = layer.premul_mut();
    for p in points {
        for ring in rings {
            let px = Rgba8::WHITE.with_alpha(ring.alpha).to_premul();
            fill_disk(img, p, ring.radius, px);
        }
    }
    layer.blurred(sigma)
}

fn fill_disk(img: &mut RgbaImage, center: Pos, radius: u32, px: [u8; 4]) {
    let r = i64::from(radius);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    let r2 = (r as f64) * (r as f64);
    for y in (cy - r).max(0)..(cy + r + 1).min(h) {
        for x in (cx - r).max(0)..(cx + r + 1).min(w) {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, image::Rgba(px));
            }
        }
    }
}

/// Flat wash over the whole canvas.
pub fn tint(canvas: Canvas, color: Rgba8) -> Layer {
    Layer::solid(canvas, color)
}

/// Vertical lines `width` pixels wide every `spacing` pixels, starting at x = 0.
pub fn stripes(canvas: Canvas, color: Rgba8, spacing: u32, width: u32) -> ThumbResult<Layer> {
    if spacing == 0 {
        return Err(ThumbError::validation("stripe spacing must be > 0"));
    }
    let px = color.to_premul();
    let premul = RgbaImage::from_fn(canvas.width, canvas.height, |x, _| {
        if x % spacing < width {
            image::Rgba(px)
        } else {
            image::Rgba([0; 4])
        }
    });
    Ok(Layer::from_premul(premul))
}

fn shift_mask(mask: &GrayImage, by: Pos) -> GrayImage {
    if by == Pos::ZERO {
        return mask.clone();
    }
    let (w, h) = (i64::from(mask.width()), i64::from(mask.height()));
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        let sx = i64::from(x) - i64::from(by.x);
        let sy = i64::from(y) - i64::from(by.y);
        if sx < 0 || sy < 0 || sx >= w || sy >= h {
            image::Luma([0])
        } else {
            *mask.get_pixel(sx as u32, sy as u32)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/primitives.rs"]
mod tests;
