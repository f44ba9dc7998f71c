use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ThumbError, ThumbResult};

/// Byte ceiling and quality ladder for [`encode_within_budget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBudget {
    pub target_bytes: u64,
    pub quality_start: u8,
    pub quality_floor: u8,
    pub quality_step: u8,
}

impl SizeBudget {
    /// 1.8 MiB, quality 95 down to 10 in steps of 5. Used for styled thumbnails.
    pub const THUMBNAIL: SizeBudget = SizeBudget {
        target_bytes: 1_887_436,
        quality_start: 95,
        quality_floor: 10,
        quality_step: 5,
    };

    /// 1.75 MiB, quality 95 down to 20 in steps of 5. Used for branded resizes.
    pub const BRANDED: SizeBudget = SizeBudget {
        target_bytes: 1_835_008,
        quality_start: 95,
        quality_floor: 20,
        quality_step: 5,
    };

    pub fn validate(&self) -> ThumbResult<()> {
        for (name, q) in [
            ("quality_start", self.quality_start),
            ("quality_floor", self.quality_floor),
        ] {
            if !(1..=100).contains(&q) {
                return Err(ThumbError::config(format!("{name} must be in 1..=100, got {q}")));
            }
        }
        if self.quality_floor > self.quality_start {
            return Err(ThumbError::config(format!(
                "quality_floor ({}) must not exceed quality_start ({})",
                self.quality_floor, self.quality_start
            )));
        }
        if self.quality_step == 0 {
            return Err(ThumbError::config("quality_step must be > 0"));
        }
        Ok(())
    }

    /// Upper bound on encoder passes for this budget.
    pub fn max_attempts(&self) -> u32 {
        let span = u32::from(self.quality_start.saturating_sub(self.quality_floor));
        span.div_ceil(u32::from(self.quality_step.max(1))) + 1
    }
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self::THUMBNAIL
    }
}

/// Result of a size-constrained encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    /// Quality of the returned encoding.
    pub quality: u8,
    pub attempts: u32,
    /// `false` when even the floor quality overshot the ceiling.
    pub within_budget: bool,
}

/// Encode `img` as baseline JPEG, lowering quality until the output fits `budget`.
///
/// Quality never drops below the floor; if the floor still overshoots, the floor encoding
/// is returned with `within_budget == false`. Relies on smaller quality giving smaller
/// output, which typical images satisfy but the codec does not promise.
pub fn encode_within_budget(img: &RgbImage, budget: &SizeBudget) -> ThumbResult<EncodedImage> {
    budget.validate()?;

    let mut quality = budget.quality_start;
    let mut attempts = 0u32;
    loop {
        let bytes = encode_jpeg(img, quality)?;
        attempts += 1;
        let size = bytes.len() as u64;
        tracing::debug!(quality, size, target = budget.target_bytes, attempts, "jpeg attempt");

        if size <= budget.target_bytes {
            return Ok(EncodedImage {
                bytes,
                quality,
                attempts,
                within_budget: true,
            });
        }
        if quality <= budget.quality_floor {
            tracing::warn!(
                quality,
                size,
                target = budget.target_bytes,
                "size budget unreachable; keeping floor-quality encoding"
            );
            return Ok(EncodedImage {
                bytes,
                quality,
                attempts,
                within_budget: false,
            });
        }
        quality = quality
            .saturating_sub(budget.quality_step)
            .max(budget.quality_floor);
    }
}

/// Drop alpha; callers composite onto an opaque base first.
pub fn flatten_rgb(img: &RgbaImage) -> RgbImage {
    img.convert()
}

/// One encode at `quality` with optimized Huffman tables and no chroma subsampling.
fn encode_jpeg(img: &RgbImage, quality: u8) -> ThumbResult<Vec<u8>> {
    encode_jpeg_with(img, quality, true)
}

pub(crate) fn encode_jpeg_with(
    img: &RgbImage,
    quality: u8,
    optimize: bool,
) -> ThumbResult<Vec<u8>> {
    let (Ok(width), Ok(height)) = (u16::try_from(img.width()), u16::try_from(img.height())) else {
        return Err(ThumbError::encode(format!(
            "jpeg dimensions {}x{} exceed 65535",
            img.width(),
            img.height()
        )));
    };

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, quality);
    encoder.set_sampling_factor(SamplingFactor::F_1_1);
    encoder.set_optimized_huffman_tables(optimize);
    encoder
        .encode(img.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| ThumbError::encode(format!("jpeg encode at quality {quality}: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
