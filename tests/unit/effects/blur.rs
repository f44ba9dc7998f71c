use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_u8(&src, 1, 2, 4, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_u8(&src, w, h, 4, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_u8(&src, w, h, 4, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_u8(&[0u8; 7], 2, 1, 4, 1, 1.0).is_err());
}

#[test]
fn gray_blur_keeps_single_channel() {
    let mut mask = GrayImage::new(9, 9);
    mask.put_pixel(4, 4, image::Luma([255]));
    let out = blur_gray(&mask, 1.0).unwrap();
    assert_eq!(out.dimensions(), (9, 9));
    assert!(out.get_pixel(4, 4).0[0] < 255);
    assert!(out.get_pixel(5, 4).0[0] > 0);
}

#[test]
fn large_sigma_path_preserves_flat_regions() {
    let img = RgbaImage::from_pixel(64, 48, image::Rgba([40, 80, 120, 255]));
    let out = blur_rgba8_premul(&img, 20.0).unwrap();
    for px in out.pixels() {
        for (got, want) in px.0.iter().zip([40u8, 80, 120, 255]) {
            assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
        }
    }
}

#[test]
fn zero_sigma_is_identity_and_negative_is_rejected() {
    let img = RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]));
    assert_eq!(blur_rgba8_premul(&img, 0.0).unwrap(), img);
    assert!(blur_rgba8_premul(&img, -1.0).is_err());
}
