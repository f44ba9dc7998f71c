use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::{
    effects::layer::Layer,
    foundation::core::Canvas,
    foundation::error::{ThumbError, ThumbResult},
};

/// Ratios closer than this are treated as already matching.
pub const ASPECT_EPSILON: f64 = 0.01;

/// How a source photo is brought to the canvas aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Center-crop the oversized axis.
    #[default]
    Crop,
    /// Keep the whole photo and fill the rest with a blurred, stretched copy.
    GlowPad,
}

/// Center-crop `img` along its oversized axis so that `width / height == target`.
///
/// Images already within [`ASPECT_EPSILON`] of the target are returned unchanged.
pub fn crop_to_aspect(img: &RgbaImage, target: f64) -> ThumbResult<RgbaImage> {
    if !target.is_finite() || target <= 0.0 {
        return Err(ThumbError::validation("target aspect must be finite and > 0"));
    }
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ThumbError::validation("cannot crop an empty image"));
    }

    let current = f64::from(w) / f64::from(h);
    if (current - target).abs() < ASPECT_EPSILON {
        return Ok(img.clone());
    }

    let cropped = if current > target {
        let new_w = ((f64::from(h) * target) as u32).clamp(1, w);
        let left = (w - new_w) / 2;
        imageops::crop_imm(img, left, 0, new_w, h).to_image()
    } else {
        let new_h = ((f64::from(w) / target) as u32).clamp(1, h);
        let top = (h - new_h) / 2;
        imageops::crop_imm(img, 0, top, w, new_h).to_image()
    };
    tracing::debug!(
        from_w = w,
        from_h = h,
        to_w = cropped.width(),
        to_h = cropped.height(),
        "cropped to aspect"
    );
    Ok(cropped)
}

/// Lanczos resample to exactly the canvas size.
pub fn resize_to_canvas(img: &RgbaImage, canvas: Canvas) -> RgbaImage {
    if img.dimensions() == (canvas.width, canvas.height) {
        return img.clone();
    }
    imageops::resize(img, canvas.width, canvas.height, FilterType::Lanczos3)
}

/// Scale `img` to the canvas height and center it over a blurred, canvas-filling copy of
/// itself. Sources wider than the canvas lose their sides.
pub fn fit_with_glow_pad(img: &RgbaImage, canvas: Canvas, sigma: f32) -> ThumbResult<RgbaImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ThumbError::validation("cannot pad an empty image"));
    }

    let ratio = f64::from(w) / f64::from(h);
    let fg_w = ((ratio * f64::from(canvas.height)) as u32).max(1);
    let fg = imageops::resize(img, fg_w, canvas.height, FilterType::Lanczos3);

    let stretched = imageops::resize(&fg, canvas.width, canvas.height, FilterType::Lanczos3);
    let mut out = Layer::from_straight(&stretched).blurred(sigma)?.to_straight();

    let x = (i64::from(canvas.width) - i64::from(fg_w)).div_euclid(2);
    imageops::overlay(&mut out, &fg, x, 0);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
