use std::path::PathBuf;

use super::*;

#[test]
fn defaults_validate() {
    let cfg = ThumbConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.budget.target_bytes, 1_887_436);
    assert_eq!(cfg.canvas, Canvas::new(1920, 1080).unwrap());
    assert_eq!(cfg.vignette_color, Rgba8::new(0, 0, 0, 180));
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: ThumbConfig = serde_json::from_str(
        r##"{
            "line1": "Deutsche Lieder",
            "fit": "glow-pad",
            "vignette_color": "#10203040",
            "budget": {"quality_floor": 30},
            "logo": {"path": "brand.png"},
            "styles": ["premium-gold", "wine-emboss"]
        }"##,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.line1, "Deutsche Lieder");
    assert_eq!(cfg.line2, "Playlist");
    assert_eq!(cfg.fit, FitMode::GlowPad);
    assert_eq!(cfg.vignette_color, Rgba8::new(0x10, 0x20, 0x30, 0x40));
    assert_eq!(cfg.budget.quality_floor, 30);
    assert_eq!(cfg.budget.quality_start, 95);
    assert_eq!(cfg.logo, Some(LogoConfig::new("brand.png")));
    assert_eq!(cfg.styles, vec![StyleId::PremiumGold, StyleId::WineEmboss]);
}

#[test]
fn partial_brand_budget_fills_from_branded() {
    let cfg: ThumbConfig =
        serde_json::from_str(r#"{"brand_budget": {"target_bytes": 900000}}"#).unwrap();
    assert_eq!(cfg.brand_budget.target_bytes, 900_000);
    assert_eq!(cfg.brand_budget.quality_floor, 20);
    assert_eq!(cfg.brand_budget.quality_start, 95);
    assert_eq!(cfg.brand_budget.quality_step, 5);

    let cfg: ThumbConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.brand_budget, SizeBudget::BRANDED);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = ThumbConfig::default();
    cfg.budget.quality_floor = 99;
    assert!(matches!(cfg.validate(), Err(ThumbError::Config(_))));

    let mut cfg = ThumbConfig::default();
    cfg.base_font_size = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = ThumbConfig::default();
    cfg.styles.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = ThumbConfig::default();
    cfg.logo = Some(LogoConfig {
        scale: 2.0,
        ..LogoConfig::new("brand.png")
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn unknown_style_fails_to_parse() {
    let err = serde_json::from_str::<ThumbConfig>(r#"{"styles": ["sparkle"]}"#);
    assert!(err.is_err());
}

#[test]
fn from_path_reads_json_file() {
    let dir = PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("thumb.json");
    std::fs::write(&path, r#"{"seed": 9, "canvas": {"width": 640, "height": 360}}"#).unwrap();

    let cfg = ThumbConfig::from_path(&path).unwrap();
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.canvas, Canvas::new(640, 360).unwrap());

    let missing = ThumbConfig::from_path(dir.join("nope.json")).unwrap_err();
    assert!(matches!(missing, ThumbError::Config(_)));
}

#[test]
fn text_block_mirrors_fields() {
    let cfg = ThumbConfig {
        base_font_size: 120.0,
        line_spacing: 4,
        ..ThumbConfig::default()
    };
    let block = cfg.text_block();
    assert_eq!(block.line1, "Nasheed");
    assert_eq!(block.base_size, 120.0);
    assert_eq!(block.spacing, 4);
}
