use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};

use crate::{
    effects::blur::blur_gray,
    effects::composite::{BlendOp, blend_in_place},
    effects::layer::Layer,
    foundation::core::{Canvas, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
};

/// Coverage mask for the vignette: 255 at the frame edges, fading to its minimum inside a
/// centered 16:9 ellipse half the canvas wide.
pub fn vignette_mask(canvas: Canvas) -> ThumbResult<GrayImage> {
    let (w, h) = (canvas.width, canvas.height);
    let rx = f64::from(w) * 0.5 / 2.0;
    let ry = rx * 9.0 / 16.0;
    let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);

    let ellipse = GrayImage::from_fn(w, h, |x, y| {
        let nx = (f64::from(x) + 0.5 - cx) / rx;
        let ny = (f64::from(y) + 0.5 - cy) / ry;
        if nx * nx + ny * ny <= 1.0 {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    });

    let sigma = (w.max(h) / 10) as f32;
    let mut mask = blur_gray(&ellipse, sigma)?;
    imageops::invert(&mut mask);
    Ok(mask)
}

/// Darken the frame around a clear central oval with `color`.
pub fn apply_vignette(img: &RgbaImage, color: Rgba8) -> ThumbResult<RgbaImage> {
    let canvas = Canvas::new(img.width(), img.height())?;
    let shade = Layer::from_mask(&vignette_mask(canvas)?, color);
    let mut out = Layer::from_straight(img);
    blend_in_place(&mut out, &shade, BlendOp::Over)?;
    Ok(out.to_straight())
}

/// Resize `logo` to `scale` of the canvas width, keeping its aspect ratio.
pub fn scale_logo(logo: &RgbaImage, canvas_width: u32, scale: f32) -> ThumbResult<RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ThumbError::config("logo scale must be finite and > 0"));
    }
    let (w, h) = logo.dimensions();
    if w == 0 || h == 0 {
        return Err(ThumbError::asset("logo image is empty"));
    }
    let target_w = ((f64::from(canvas_width) * f64::from(scale)) as u32).max(1);
    let ratio = f64::from(target_w) / f64::from(w);
    let target_h = ((f64::from(h) * ratio) as u32).max(1);
    Ok(imageops::resize(logo, target_w, target_h, FilterType::Lanczos3))
}

/// Paste `logo` with its own alpha flush to the bottom-right corner, inset by `padding`.
///
/// Returns the top-left anchor used, or `None` when there is no logo.
pub fn place_logo(img: &mut RgbaImage, logo: Option<&RgbaImage>, padding: u32) -> Option<(i64, i64)> {
    let logo = logo?;
    let x = i64::from(img.width()) - i64::from(logo.width()) - i64::from(padding);
    let y = i64::from(img.height()) - i64::from(logo.height()) - i64::from(padding);
    imageops::overlay(img, logo, x, y);
    Some((x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/overlay.rs"]
mod tests;
