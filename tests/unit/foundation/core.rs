use super::*;
use serde_json::json;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert!((c.aspect() - 16.0 / 9.0).abs() < 1e-9);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff1493")).unwrap();
    assert_eq!(c, Rgba8::opaque(255, 20, 147));

    let c: Rgba8 = serde_json::from_value(json!("#000000B4")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 0, 180));

    assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
}

#[test]
fn parses_byte_arrays_and_serializes_as_hex() {
    let c: Rgba8 = serde_json::from_value(json!([64, 224, 208])).unwrap();
    assert_eq!(c, Rgba8::opaque(64, 224, 208));
    let c: Rgba8 = serde_json::from_value(json!([0, 255, 255, 180])).unwrap();
    assert_eq!(c.a, 180);
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#00ffffb4"));
}

#[test]
fn premul_scales_color_by_alpha_and_coverage() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::new(255, 0, 0, 128).to_premul(), [128, 0, 0, 128]);
    assert_eq!(Rgba8::WHITE.premul_with_coverage(0), [0, 0, 0, 0]);
}

#[test]
fn lerp_endpoints() {
    let a = Rgba8::opaque(255, 20, 0);
    let b = Rgba8::opaque(255, 140, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5).g, 80);
}
