use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Decode encoded image bytes (PNG, JPEG, ...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> ThumbResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ThumbError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(ThumbError::asset("decoded image is empty"));
    }
    Ok(rgba)
}

/// Read and decode a source image. Any failure is reported as a recoverable asset error.
pub fn load_image(path: &Path) -> ThumbResult<RgbaImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(|e| ThumbError::asset(format!("{e:#}")))?;
    decode_image(&bytes)
        .map_err(|e| ThumbError::asset(format!("'{}': {e}", path.display())))
}

/// Load an optional watermark. Absent or unreadable files yield `None` with a warning.
pub fn load_logo(path: &Path) -> Option<RgbaImage> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "logo not found, skipping watermark");
        return None;
    }
    match load_image(path) {
        Ok(img) => Some(img),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "could not open logo, skipping watermark");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
