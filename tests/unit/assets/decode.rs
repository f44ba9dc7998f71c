use std::io::Cursor;

use super::*;

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let src = RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let decoded = decode_image(&png_bytes(&src)).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100u8, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_recoverable() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn missing_logo_is_none() {
    assert!(load_logo(Path::new("target/no-such-brand.png")).is_none());
}

#[test]
fn unreadable_logo_is_none() {
    let dir = std::env::temp_dir().join("thumbforge_decode_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.png");
    std::fs::write(&path, b"nope").unwrap();
    assert!(load_logo(&path).is_none());
}
