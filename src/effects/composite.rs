use serde::{Deserialize, Serialize};

use crate::effects::layer::Layer;
use crate::foundation::error::ThumbResult;
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// How a layer is folded into the accumulating overlay.
///
/// All operators work channel-wise on premultiplied pixels, alpha included, which keeps
/// every result a valid premultiplied pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendOp {
    /// Source-over with straight-alpha semantics.
    #[default]
    Over,
    /// `1 - (1 - a)(1 - b)`: brightening glows.
    Screen,
    /// `a * b`: mask intersection.
    Multiply,
    /// Clamped sum: flares and bloom spots.
    Add,
}

impl BlendOp {
    pub fn apply(self, dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
        match self {
            BlendOp::Over => over(dst, src),
            BlendOp::Screen => screen(dst, src),
            BlendOp::Multiply => multiply(dst, src),
            BlendOp::Add => add(dst, src),
        }
    }
}

fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn screen(a: PremulRgba8, b: PremulRgba8) -> PremulRgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        let ia = 255u16 - u16::from(a[i]);
        let ib = 255u16 - u16::from(b[i]);
        out[i] = 255 - mul_div255(ia, ib);
    }
    out
}

fn multiply(a: PremulRgba8, b: PremulRgba8) -> PremulRgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255(u16::from(a[i]), u16::from(b[i]));
    }
    out
}

fn add(a: PremulRgba8, b: PremulRgba8) -> PremulRgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(a[i], b[i]);
    }
    out
}

/// Fold `src` into `dst` with `op`. Both layers must have identical dimensions.
pub fn blend_in_place(dst: &mut Layer, src: &Layer, op: BlendOp) -> ThumbResult<()> {
    dst.ensure_same_size(src)?;
    for (d, s) in dst.premul_mut().pixels_mut().zip(src.premul().pixels()) {
        d.0 = op.apply(d.0, s.0);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
