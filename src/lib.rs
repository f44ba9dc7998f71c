//! thumbforge turns arbitrary photos into finished 16:9 thumbnails.
//!
//! # Pipeline overview
//!
//! 1. **Fit**: center-crop (or glow-pad) the source to the canvas aspect and resample.
//! 2. **Vignette**: darken the frame around a clear central oval.
//! 3. **Style**: run a [`Recipe`] from the [`StyleId`] catalog, which reduces effect layers
//!    (shadows, strokes, glows, fills) into an overlay, composites it, and finishes with a
//!    crisp text pass.
//! 4. **Encode**: JPEG at descending quality until the output fits a [`SizeBudget`].
//!
//! Text placement is resolved once per (font, text, canvas) into a [`Layout`], and every
//! effect of a recipe draws through it.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the only randomness (pattern fill) is seeded.
//! - **Premultiplied RGBA8** inside the compositor; straight RGBA at the edges.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod encode;
mod foundation;
mod geometry;
mod layout;
mod pipeline;
mod styles;

/// Input discovery, output naming and per-image parallelism for directory runs.
pub mod batch;

pub use assets::decode::{decode_image, load_image, load_logo};
pub use assets::font::{FontAsset, InkBox};
pub use config::{LogoConfig, ThumbConfig};
pub use effects::composite::{BlendOp, blend_in_place};
pub use effects::layer::{Layer, blurred_mask};
pub use effects::primitives;
pub use encode::jpeg::{EncodedImage, SizeBudget, encode_within_budget, flatten_rgb};
pub use foundation::core::{Canvas, Pos, Rgba8};
pub use foundation::error::{ThumbError, ThumbResult};
pub use foundation::math::Rng64;
pub use geometry::fit::{
    ASPECT_EPSILON, FitMode, crop_to_aspect, fit_with_glow_pad, resize_to_canvas,
};
pub use geometry::overlay::{apply_vignette, place_logo, scale_logo, vignette_mask};
pub use layout::text::{Layout, LineMetrics, TextBlock, TextMetrics, resolve_layout};
pub use pipeline::{Brander, Thumbnailer};
pub use styles::catalog::StyleId;
pub use styles::recipe::{Effect, Recipe, Step};
