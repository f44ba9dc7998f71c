use image::RgbaImage;

use crate::{
    assets::decode::load_logo,
    assets::font::FontAsset,
    config::ThumbConfig,
    encode::jpeg::{EncodedImage, SizeBudget, encode_within_budget, flatten_rgb},
    foundation::core::Canvas,
    foundation::error::ThumbResult,
    geometry::fit::{FitMode, crop_to_aspect, fit_with_glow_pad, resize_to_canvas},
    geometry::overlay::{apply_vignette, place_logo, scale_logo},
    layout::text::{Layout, TextMetrics},
    styles::catalog::StyleId,
};

/// End-to-end per-image flow: geometry, vignette, style recipe, size-constrained encode.
///
/// Font and text metrics are resolved once in [`Thumbnailer::new`] and only read
/// afterwards, so one `Thumbnailer` can serve many threads.
#[derive(Debug)]
pub struct Thumbnailer {
    config: ThumbConfig,
    layout: Layout,
}

impl Thumbnailer {
    /// Load the configured font. A missing font is fatal.
    #[tracing::instrument(skip_all, fields(font = %config.font_path.display()))]
    pub fn new(config: ThumbConfig) -> ThumbResult<Self> {
        config.validate()?;
        let font = FontAsset::load(&config.font_path)?;
        tracing::debug!(font = font.label(), "loaded font");
        Self::with_font(config, &font)
    }

    /// Like [`Thumbnailer::new`] with an already loaded font.
    pub fn with_font(config: ThumbConfig, font: &FontAsset) -> ThumbResult<Self> {
        config.validate()?;
        let metrics = TextMetrics::measure(font, &config.text_block())?;
        let layout = metrics.place(config.canvas);
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &ThumbConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Bring `src` to the canvas: crop or glow-pad, resample, then vignette if enabled.
    pub fn prepare_base(&self, src: &RgbaImage) -> ThumbResult<RgbaImage> {
        let canvas = self.config.canvas;
        let fitted = match self.config.fit {
            FitMode::Crop => {
                let cropped = crop_to_aspect(src, canvas.aspect())?;
                resize_to_canvas(&cropped, canvas)
            }
            FitMode::GlowPad => fit_with_glow_pad(src, canvas, self.config.glow_pad_blur)?,
        };
        if self.config.vignette {
            apply_vignette(&fitted, self.config.vignette_color)
        } else {
            Ok(fitted)
        }
    }

    /// Run one style recipe over a prepared base.
    pub fn render(&self, base: &RgbaImage, style: StyleId) -> ThumbResult<RgbaImage> {
        style.recipe().apply(base, &self.layout, self.config.seed)
    }

    /// Prepare, render and encode one styled thumbnail.
    #[tracing::instrument(skip(self, src), fields(src_w = src.width(), src_h = src.height()))]
    pub fn thumbnail(&self, src: &RgbaImage, style: StyleId) -> ThumbResult<EncodedImage> {
        let base = self.prepare_base(src)?;
        self.finish(&base, style)
    }

    /// All configured styles for one source, sharing a single prepared base.
    #[tracing::instrument(skip(self, src), fields(src_w = src.width(), src_h = src.height()))]
    pub fn thumbnails(&self, src: &RgbaImage) -> ThumbResult<Vec<(StyleId, EncodedImage)>> {
        let base = self.prepare_base(src)?;
        self.config
            .styles
            .iter()
            .map(|&style| Ok((style, self.finish(&base, style)?)))
            .collect()
    }

    fn finish(&self, base: &RgbaImage, style: StyleId) -> ThumbResult<EncodedImage> {
        let composed = self.render(base, style)?;
        encode_logged(&composed, &self.config.budget)
    }
}

/// Branded resize: glow-pad to the canvas, stamp the watermark, encode with the brand
/// budget. Draws no text, so no font is loaded.
#[derive(Debug)]
pub struct Brander {
    canvas: Canvas,
    glow_pad_blur: f32,
    budget: SizeBudget,
    logo: Option<RgbaImage>,
    padding: u32,
}

impl Brander {
    /// Load and pre-scale the configured logo. A missing or unusable logo only disables the
    /// watermark.
    #[tracing::instrument(
        skip_all,
        fields(canvas_w = config.canvas.width, canvas_h = config.canvas.height)
    )]
    pub fn new(config: &ThumbConfig) -> ThumbResult<Self> {
        config.validate()?;
        let logo = config.logo.as_ref().and_then(|logo_cfg| {
            load_logo(&logo_cfg.path).and_then(|img| {
                scale_logo(&img, config.canvas.width, logo_cfg.scale)
                    .map_err(|err| tracing::warn!(%err, "could not scale logo, skipping watermark"))
                    .ok()
            })
        });

        Ok(Self {
            canvas: config.canvas,
            glow_pad_blur: config.glow_pad_blur,
            budget: config.brand_budget,
            logo,
            padding: config.logo.as_ref().map_or(0, |l| l.padding),
        })
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    #[tracing::instrument(skip(self, src), fields(src_w = src.width(), src_h = src.height()))]
    pub fn brand(&self, src: &RgbaImage) -> ThumbResult<EncodedImage> {
        let mut img = fit_with_glow_pad(src, self.canvas, self.glow_pad_blur)?;
        if let Some((x, y)) = place_logo(&mut img, self.logo.as_ref(), self.padding) {
            tracing::debug!(x, y, "placed logo");
        }
        encode_logged(&img, &self.budget)
    }
}

fn encode_logged(img: &RgbaImage, budget: &SizeBudget) -> ThumbResult<EncodedImage> {
    let encoded = encode_within_budget(&flatten_rgb(img), budget)?;
    tracing::info!(
        bytes = encoded.bytes.len(),
        quality = encoded.quality,
        attempts = encoded.attempts,
        within_budget = encoded.within_budget,
        "encoded"
    );
    Ok(encoded)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
