use super::*;

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let v = if (x / 8 + y / 8) % 2 == 0 { 220 } else { 30 };
        image::Rgba([v, v / 2, 255 - v, 255])
    })
}

const WIDE: f64 = 16.0 / 9.0;

#[test]
fn crop_hits_target_ratio_and_shrinks() {
    for (w, h) in [(4000, 3000), (1000, 1000), (3000, 400), (401, 999), (1920, 1081)] {
        let out = crop_to_aspect(&checker(w, h), WIDE).unwrap();
        let (ow, oh) = out.dimensions();
        assert!(ow <= w && oh <= h, "{w}x{h} -> {ow}x{oh}");
        let ratio = f64::from(ow) / f64::from(oh);
        assert!((ratio - WIDE).abs() < ASPECT_EPSILON, "{w}x{h} -> {ratio}");
    }
}

#[test]
fn crop_of_4000x3000_is_4000x2250() {
    let out = crop_to_aspect(&checker(4000, 3000), WIDE).unwrap();
    assert_eq!(out.dimensions(), (4000, 2250));
}

#[test]
fn crop_is_centered() {
    let img = checker(300, 100);
    let out = crop_to_aspect(&img, 1.0).unwrap();
    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(0, 0), img.get_pixel(100, 0));
}

#[test]
fn crop_is_idempotent() {
    for (w, h) in [(4000, 3000), (333, 777), (1920, 1080)] {
        let once = crop_to_aspect(&checker(w, h), WIDE).unwrap();
        let twice = crop_to_aspect(&once, WIDE).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn crop_rejects_bad_inputs() {
    assert!(crop_to_aspect(&checker(10, 10), 0.0).is_err());
    assert!(crop_to_aspect(&checker(10, 10), f64::NAN).is_err());
    assert!(crop_to_aspect(&RgbaImage::new(0, 5), WIDE).is_err());
}

#[test]
fn resize_hits_canvas() {
    let canvas = Canvas::new(64, 36).unwrap();
    assert_eq!(resize_to_canvas(&checker(400, 225), canvas).dimensions(), (64, 36));
    let exact = checker(64, 36);
    assert_eq!(resize_to_canvas(&exact, canvas), exact);
}

#[test]
fn glow_pad_fills_canvas_and_keeps_center_sharp() {
    let canvas = Canvas::new(160, 90).unwrap();
    let red = RgbaImage::from_pixel(90, 90, image::Rgba([200, 0, 0, 255]));
    let out = fit_with_glow_pad(&red, canvas, 10.0).unwrap();
    assert_eq!(out.dimensions(), (160, 90));
    assert!(out.pixels().all(|p| p.0[3] == 255));
    let center = out.get_pixel(80, 45).0;
    assert!(center[0] >= 198 && center[1] <= 2 && center[2] <= 2, "{center:?}");
}

#[test]
fn glow_pad_crops_overwide_sources() {
    let canvas = Canvas::new(160, 90).unwrap();
    let out = fit_with_glow_pad(&checker(400, 90), canvas, 10.0).unwrap();
    assert_eq!(out.dimensions(), (160, 90));
}
