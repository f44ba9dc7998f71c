use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::{
    effects::composite::{BlendOp, blend_in_place},
    effects::layer::Layer,
    effects::primitives::{self, DotPattern, FlareRing, StrokePaint, TextStamp},
    foundation::core::{Pos, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
    layout::text::Layout,
};

/// One effect primitive with its parameters. Blur values are Gaussian sigmas in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Effect {
    Text {
        color: Rgba8,
        #[serde(default)]
        offset: Pos,
    },
    Shadow {
        color: Rgba8,
        #[serde(default)]
        offset: Pos,
        blur: f32,
    },
    Outline {
        paint: StrokePaint,
        radius: u32,
    },
    Glow {
        color: Rgba8,
        blur: f32,
    },
    Gradient {
        top: Rgba8,
        bottom: Rgba8,
    },
    Pattern {
        color: Rgba8,
        #[serde(default)]
        pattern: DotPattern,
    },
    Foil {
        dark: Rgba8,
        light: Rgba8,
    },
    Emboss {
        color: Rgba8,
        #[serde(default = "default_emboss_kernel")]
        kernel: [i32; 9],
    },
    Flare {
        rings: Vec<FlareRing>,
        blur: f32,
    },
    Tint {
        color: Rgba8,
    },
    Stripes {
        color: Rgba8,
        spacing: u32,
        width: u32,
    },
}

fn default_emboss_kernel() -> [i32; 9] {
    primitives::EMBOSS_KERNEL
}

impl Effect {
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Text { .. } => "text",
            Effect::Shadow { .. } => "shadow",
            Effect::Outline { .. } => "outline",
            Effect::Glow { .. } => "glow",
            Effect::Gradient { .. } => "gradient",
            Effect::Pattern { .. } => "pattern",
            Effect::Foil { .. } => "foil",
            Effect::Emboss { .. } => "emboss",
            Effect::Flare { .. } => "flare",
            Effect::Tint { .. } => "tint",
            Effect::Stripes { .. } => "stripes",
        }
    }

    /// Render this effect as a fresh layer. `seed` only feeds the pattern fill.
    pub fn render(&self, stamp: &TextStamp<'_>, seed: u64) -> ThumbResult<Layer> {
        match self {
            Effect::Text { color, offset } => Ok(primitives::text_layer(stamp, *color, *offset)),
            Effect::Shadow {
                color,
                offset,
                blur,
            } => primitives::shadow(stamp, *color, *offset, *blur),
            Effect::Outline { paint, radius } => primitives::outline(stamp, *paint, *radius),
            Effect::Glow { color, blur } => primitives::glow(stamp, *color, *blur),
            Effect::Gradient { top, bottom } => Ok(primitives::gradient_fill(stamp, *top, *bottom)),
            Effect::Pattern { color, pattern } => {
                primitives::pattern_fill(stamp, *color, *pattern, seed)
            }
            Effect::Foil { dark, light } => Ok(primitives::foil(stamp, *dark, *light)),
            Effect::Emboss { color, kernel } => Ok(primitives::emboss(stamp, *color, *kernel)),
            Effect::Flare { rings, blur } => primitives::flare(stamp, rings, *blur),
            Effect::Tint { color } => Ok(primitives::tint(stamp.canvas(), *color)),
            Effect::Stripes {
                color,
                spacing,
                width,
            } => primitives::stripes(stamp.canvas(), *color, *spacing, *width),
        }
    }
}

/// An effect and the operator that folds it into the overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub effect: Effect,
    #[serde(default)]
    pub blend: BlendOp,
}

impl Step {
    pub fn over(effect: Effect) -> Self {
        Self {
            effect,
            blend: BlendOp::Over,
        }
    }

    pub fn with(effect: Effect, blend: BlendOp) -> Self {
        Self { effect, blend }
    }
}

/// A named, ordered composition of effects.
///
/// Execution reduces `steps` into a transparent overlay strictly in order, composites the
/// overlay over the base image, then stamps both lines once more in `crisp`, opaque and
/// unblurred.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub steps: Vec<Step>,
    pub crisp: Rgba8,
}

impl Recipe {
    pub fn apply(&self, base: &RgbaImage, layout: &Layout, seed: u64) -> ThumbResult<RgbaImage> {
        let canvas = layout.canvas();
        if base.dimensions() != (canvas.width, canvas.height) {
            return Err(ThumbError::validation(format!(
                "base image is {}x{} but layout targets {}x{}",
                base.width(),
                base.height(),
                canvas.width,
                canvas.height
            )));
        }

        let stamp = TextStamp::new(layout);
        let mut overlay = Layer::transparent(canvas);
        for (idx, step) in self.steps.iter().enumerate() {
            tracing::debug!(
                recipe = %self.name,
                step = idx,
                kind = step.effect.kind(),
                blend = ?step.blend,
                "render step"
            );
            let layer = step.effect.render(&stamp, seed)?;
            blend_in_place(&mut overlay, &layer, step.blend)?;
        }

        let mut out = Layer::from_straight(base);
        blend_in_place(&mut out, &overlay, BlendOp::Over)?;
        let crisp = primitives::text_layer(&stamp, self.crisp, Pos::ZERO);
        blend_in_place(&mut out, &crisp, BlendOp::Over)?;
        Ok(out.to_straight())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/styles/recipe.rs"]
mod tests;
