use image::{GrayImage, RgbaImage};

use crate::{
    effects::blur::{blur_gray, blur_rgba8_premul},
    foundation::core::{Canvas, Pos, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
};

/// A canvas-sized buffer of premultiplied RGBA8 pixels holding one visual contribution.
///
/// Layers are produced by the effect primitives and folded into an overlay with a
/// [`crate::BlendOp`]; they never outlive a single recipe execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    width: u32,
    height: u32,
    premul: RgbaImage,
}

impl Layer {
    pub fn transparent(canvas: Canvas) -> Self {
        Self::solid(canvas, Rgba8::TRANSPARENT)
    }

    pub fn solid(canvas: Canvas, color: Rgba8) -> Self {
        let px = image::Rgba(color.to_premul());
        Self::wrap(RgbaImage::from_pixel(canvas.width, canvas.height, px))
    }

    /// Flat `color` whose alpha is modulated by `mask`.
    pub fn from_mask(mask: &GrayImage, color: Rgba8) -> Self {
        let (w, h) = mask.dimensions();
        let premul = RgbaImage::from_fn(w, h, |x, y| {
            image::Rgba(color.premul_with_coverage(mask.get_pixel(x, y).0[0]))
        });
        Self::wrap(premul)
    }

    /// Per-pixel colors from `paint` whose alpha is modulated by `mask`.
    pub fn from_mask_with(mask: &GrayImage, mut paint: impl FnMut(u32, u32) -> Rgba8) -> Self {
        let (w, h) = mask.dimensions();
        let premul = RgbaImage::from_fn(w, h, |x, y| {
            let coverage = mask.get_pixel(x, y).0[0];
            if coverage == 0 {
                return image::Rgba([0; 4]);
            }
            image::Rgba(paint(x, y).premul_with_coverage(coverage))
        });
        Self::wrap(premul)
    }

    /// Import a straight-alpha image.
    pub fn from_straight(img: &RgbaImage) -> Self {
        let mut premul = img.clone();
        for px in premul.pixels_mut() {
            let [r, g, b, a] = px.0;
            px.0 = Rgba8::new(r, g, b, a).to_premul();
        }
        Self::wrap(premul)
    }

    /// Wrap a buffer that already holds premultiplied pixels.
    pub fn from_premul(premul: RgbaImage) -> Self {
        Self::wrap(premul)
    }

    fn wrap(premul: RgbaImage) -> Self {
        Self {
            width: premul.width(),
            height: premul.height(),
            premul,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn premul(&self) -> &RgbaImage {
        &self.premul
    }

    pub(crate) fn premul_mut(&mut self) -> &mut RgbaImage {
        &mut self.premul
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.premul.get_pixel(x, y).0
    }

    /// Export as straight alpha.
    pub fn to_straight(&self) -> RgbaImage {
        let mut out = self.premul.clone();
        for px in out.pixels_mut() {
            px.0 = unpremultiply(px.0);
        }
        out
    }

    /// Shift content by `by`; uncovered pixels become transparent.
    pub fn translated(&self, by: Pos) -> Self {
        if by == Pos::ZERO {
            return self.clone();
        }
        let (w, h) = (self.width as i64, self.height as i64);
        let premul = RgbaImage::from_fn(self.width, self.height, |x, y| {
            let sx = i64::from(x) - i64::from(by.x);
            let sy = i64::from(y) - i64::from(by.y);
            if sx < 0 || sy < 0 || sx >= w || sy >= h {
                image::Rgba([0; 4])
            } else {
                *self.premul.get_pixel(sx as u32, sy as u32)
            }
        });
        Self::wrap(premul)
    }

    /// Gaussian blur with standard deviation `sigma` in pixels.
    pub fn blurred(&self, sigma: f32) -> ThumbResult<Self> {
        let premul = blur_rgba8_premul(&self.premul, sigma)?;
        Ok(Self::wrap(premul))
    }

    pub(crate) fn ensure_same_size(&self, other: &Layer) -> ThumbResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(ThumbError::validation(format!(
                "layer size mismatch: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }
}

/// Blur a coverage mask, keeping it single-channel.
pub fn blurred_mask(mask: &GrayImage, sigma: f32) -> ThumbResult<GrayImage> {
    blur_gray(mask, sigma)
}

pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let un = |c: u8| -> u8 {
        let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
        v.min(255) as u8
    };
    [un(px[0]), un(px[1]), un(px[2]), a]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/layer.rs"]
mod tests;
