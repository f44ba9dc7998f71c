use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    encode::jpeg::SizeBudget,
    foundation::core::{Canvas, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
    geometry::fit::FitMode,
    layout::text::TextBlock,
    styles::catalog::StyleId,
};

/// Everything a [`crate::Thumbnailer`] needs. Every field has a default, so a config file
/// only lists what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbConfig {
    pub font_path: PathBuf,
    pub line1: String,
    pub line2: String,
    pub base_font_size: f32,
    pub line_spacing: i32,
    pub canvas: Canvas,
    pub fit: FitMode,
    /// Background blur sigma for [`FitMode::GlowPad`] and the branded resize.
    pub glow_pad_blur: f32,
    pub vignette: bool,
    pub vignette_color: Rgba8,
    /// Budget for styled thumbnails.
    pub budget: SizeBudget,
    /// Budget for branded resizes. Fields missing from a partial object come from
    /// [`SizeBudget::BRANDED`].
    #[serde(deserialize_with = "deserialize_brand_budget")]
    pub brand_budget: SizeBudget,
    pub logo: Option<LogoConfig>,
    pub styles: Vec<StyleId>,
    /// Seed for stochastic effects.
    pub seed: u64,
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("fonts/ArefRuqaa-Bold.ttf"),
            line1: "Nasheed".to_owned(),
            line2: "Playlist".to_owned(),
            base_font_size: 200.0,
            line_spacing: 10,
            canvas: Canvas::FULL_HD,
            fit: FitMode::Crop,
            glow_pad_blur: 35.0,
            vignette: true,
            vignette_color: Rgba8::new(0, 0, 0, 180),
            budget: SizeBudget::THUMBNAIL,
            brand_budget: SizeBudget::BRANDED,
            logo: None,
            styles: StyleId::DEFAULT_SET.to_vec(),
            seed: 0,
        }
    }
}

/// Watermark placed by the branded resize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogoConfig {
    pub path: PathBuf,
    /// Logo width as a fraction of the canvas width.
    #[serde(default = "default_logo_scale")]
    pub scale: f32,
    /// Inset from the bottom-right corner in pixels.
    #[serde(default = "default_logo_padding")]
    pub padding: u32,
}

impl LogoConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scale: default_logo_scale(),
            padding: default_logo_padding(),
        }
    }
}

/// [`SizeBudget`] with every field optional, so a partial `brand_budget` object overrides
/// only what it names.
#[derive(Deserialize)]
struct PartialBudget {
    target_bytes: Option<u64>,
    quality_start: Option<u8>,
    quality_floor: Option<u8>,
    quality_step: Option<u8>,
}

fn deserialize_brand_budget<'de, D>(deserializer: D) -> Result<SizeBudget, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let p = PartialBudget::deserialize(deserializer)?;
    let base = SizeBudget::BRANDED;
    Ok(SizeBudget {
        target_bytes: p.target_bytes.unwrap_or(base.target_bytes),
        quality_start: p.quality_start.unwrap_or(base.quality_start),
        quality_floor: p.quality_floor.unwrap_or(base.quality_floor),
        quality_step: p.quality_step.unwrap_or(base.quality_step),
    })
}

fn default_logo_scale() -> f32 {
    0.1
}

fn default_logo_padding() -> u32 {
    30
}

impl ThumbConfig {
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ThumbError::config(format!("open config '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ThumbError::config(format!("parse config '{}': {e}", path.display())))
    }

    pub fn validate(&self) -> ThumbResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ThumbError::config("canvas dimensions must be > 0"));
        }
        if !self.base_font_size.is_finite() || self.base_font_size <= 0.0 {
            return Err(ThumbError::config("base_font_size must be finite and > 0"));
        }
        if !self.glow_pad_blur.is_finite() || self.glow_pad_blur < 0.0 {
            return Err(ThumbError::config("glow_pad_blur must be finite and >= 0"));
        }
        self.budget.validate()?;
        self.brand_budget.validate()?;
        if let Some(logo) = &self.logo
            && (!logo.scale.is_finite() || logo.scale <= 0.0 || logo.scale > 1.0)
        {
            return Err(ThumbError::config("logo.scale must be in (0, 1]"));
        }
        if self.styles.is_empty() {
            return Err(ThumbError::config("at least one style must be selected"));
        }
        Ok(())
    }

    pub fn text_block(&self) -> TextBlock {
        TextBlock {
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            base_size: self.base_font_size,
            spacing: self.line_spacing,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
