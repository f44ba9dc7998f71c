use std::path::PathBuf;

use super::*;
use crate::assets::font::FontAsset;
use crate::layout::text::{TextBlock, resolve_layout};

fn small_layout() -> Layout {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans-Bold.ttf");
    let font = FontAsset::load(&path).unwrap();
    let mut block = TextBlock::new("Nasheed", "Playlist");
    block.base_size = 40.0;
    resolve_layout(&font, &block, Canvas::new(320, 180).unwrap()).unwrap()
}

fn alpha_sum(layer: &Layer) -> u64 {
    layer.premul().pixels().map(|p| u64::from(p.0[3])).sum()
}

fn covered(layer: &Layer) -> usize {
    layer.premul().pixels().filter(|p| p.0[3] > 0).count()
}

#[test]
fn text_layer_matches_silhouette() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let layer = text_layer(&stamp, Rgba8::WHITE, Pos::ZERO);
    let mask = layout.silhouette(Pos::ZERO);
    for (px, m) in layer.premul().pixels().zip(mask.pixels()) {
        assert_eq!(px.0[3], m.0[0]);
    }
}

#[test]
fn shifted_stamp_equals_rasterized_offset() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    assert_eq!(stamp.mask_at(Pos::new(3, -2)), layout.silhouette(Pos::new(3, -2)));
}

#[test]
fn shadow_is_offset_and_soft() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let sharp = text_layer(&stamp, Rgba8::BLACK, Pos::ZERO);
    let soft = shadow(&stamp, Rgba8::BLACK, Pos::new(10, 10), 3.0).unwrap();
    assert!(covered(&soft) > covered(&sharp));

    let centroid = |l: &Layer| {
        let (mut sx, mut sy, mut n) = (0f64, 0f64, 0f64);
        for (x, y, p) in l.premul().enumerate_pixels() {
            let a = f64::from(p.0[3]);
            sx += f64::from(x) * a;
            sy += f64::from(y) * a;
            n += a;
        }
        (sx / n, sy / n)
    };
    let (ax, ay) = centroid(&sharp);
    let (bx, by) = centroid(&soft);
    assert!((bx - ax - 10.0).abs() < 1.5 && (by - ay - 10.0).abs() < 1.5);
}

#[test]
fn outline_surrounds_glyphs() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let fill = text_layer(&stamp, Rgba8::WHITE, Pos::ZERO);
    let ring = outline(&stamp, StrokePaint::Solid(Rgba8::BLACK), 2).unwrap();
    assert!(covered(&ring) > covered(&fill));
}

#[test]
fn alternating_outline_uses_both_colors() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let paint = StrokePaint::Alternating {
        even: Rgba8::opaque(255, 0, 0),
        odd: Rgba8::opaque(0, 0, 255),
    };
    let ring = outline(&stamp, paint, 2).unwrap();
    let has_red = ring.premul().pixels().any(|p| p.0 == [255, 0, 0, 255]);
    let has_blue = ring.premul().pixels().any(|p| p.0 == [0, 0, 255, 255]);
    assert!(has_red && has_blue);
}

#[test]
fn glow_keeps_color_and_spreads() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let layer = glow(&stamp, Rgba8::opaque(0, 255, 255), 4.0).unwrap();
    let sharp = text_layer(&stamp, Rgba8::WHITE, Pos::ZERO);
    assert!(covered(&layer) > covered(&sharp));
    for p in layer.premul().pixels() {
        assert_eq!(p.0[0], 0);
        assert_eq!(p.0[1], p.0[3]);
    }
}

#[test]
fn gradient_runs_top_to_bottom() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let top = Rgba8::opaque(255, 0, 0);
    let bottom = Rgba8::opaque(0, 0, 255);
    let layer = gradient_fill(&stamp, top, bottom);
    let straight = layer.to_straight();

    let opaque_rows: Vec<(u32, [u8; 4])> = straight
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] == 255)
        .map(|(_, y, p)| (y, p.0))
        .collect();
    let (first_y, first) = opaque_rows.first().copied().unwrap();
    let (last_y, last) = opaque_rows.last().copied().unwrap();
    assert!(last_y > first_y);
    assert!(first[0] > last[0]);
    assert!(first[2] < last[2]);
}

#[test]
fn pattern_is_seeded_and_inside_text() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let color = Rgba8::opaque(255, 215, 0);
    let a = pattern_fill(&stamp, color, DotPattern::default(), 7).unwrap();
    let b = pattern_fill(&stamp, color, DotPattern::default(), 7).unwrap();
    let c = pattern_fill(&stamp, color, DotPattern::default(), 8).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);

    let mask = layout.silhouette(Pos::ZERO);
    for (p, m) in a.premul().pixels().zip(mask.pixels()) {
        assert!(p.0[3] <= m.0[0]);
    }
    let full = text_layer(&stamp, color, Pos::ZERO);
    assert!(alpha_sum(&a) < alpha_sum(&full));
    assert!(alpha_sum(&a) > 0);
}

#[test]
fn pattern_rejects_bad_parameters() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let bad = DotPattern {
        cell: 0,
        ..DotPattern::default()
    };
    assert!(pattern_fill(&stamp, Rgba8::WHITE, bad, 1).is_err());
    let bad = DotPattern {
        density: 1.5,
        ..DotPattern::default()
    };
    assert!(pattern_fill(&stamp, Rgba8::WHITE, bad, 1).is_err());
}

#[test]
fn foil_is_darker_near_center() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let dark = Rgba8::opaque(150, 130, 0);
    let light = Rgba8::opaque(255, 215, 0);
    let straight = foil(&stamp, dark, light).to_straight();

    let canvas = layout.canvas();
    let (cx, cy) = (canvas.width as f64 / 2.0, canvas.height as f64 / 2.0);
    let mut opaque: Vec<(f64, u8)> = straight
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] == 255)
        .map(|(x, y, p)| {
            let d = (f64::from(x) - cx).hypot(f64::from(y) - cy);
            (d, p.0[0])
        })
        .collect();
    opaque.sort_by(|a, b| a.0.total_cmp(&b.0));
    let nearest = opaque.first().unwrap().1;
    let farthest = opaque.last().unwrap().1;
    assert!(nearest <= farthest);
    assert!(opaque.iter().all(|(_, r)| (150..=255).contains(r)));
}

#[test]
fn emboss_lights_one_side_only() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let flat = Layer::from_mask(&layout.silhouette(Pos::ZERO), Rgba8::new(255, 255, 255, 20));
    let relief = emboss(&stamp, Rgba8::new(255, 255, 255, 20), EMBOSS_KERNEL);
    assert_ne!(relief, flat);
    assert!(relief.premul().pixels().any(|p| p.0[3] > 20));
}

#[test]
fn emboss_identity_kernel_is_flat_render() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let color = Rgba8::opaque(200, 100, 50);
    let identity = [0, 0, 0, 0, 1, 0, 0, 0, 0];
    let out = emboss(&stamp, color, identity);
    let mask = layout.silhouette(Pos::ZERO);
    for (p, m) in out.premul().pixels().zip(mask.pixels()) {
        assert_eq!(p.0[3], m.0[0]);
    }
}

#[test]
fn flare_spots_sit_at_line_ends() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let rings = [
        FlareRing { radius: 30, alpha: 10 },
        FlareRing { radius: 15, alpha: 30 },
        FlareRing { radius: 5, alpha: 60 },
    ];
    let layer = flare(&stamp, &rings, 0.0).unwrap();
    let [p1, _] = layout.positions();
    assert_eq!(layer.pixel(p1.x as u32, p1.y as u32), [60, 60, 60, 60]);
    assert_eq!(
        layer.pixel(p1.x as u32 + 10, p1.y as u32),
        [30, 30, 30, 30]
    );
    assert_eq!(layer.pixel(0, layout.canvas().height - 1), [0, 0, 0, 0]);
}

#[test]
fn later_flare_rings_replace_earlier_ones() {
    let layout = small_layout();
    let stamp = TextStamp::new(&layout);
    let rings = [
        FlareRing { radius: 5, alpha: 60 },
        FlareRing { radius: 15, alpha: 30 },
        FlareRing { radius: 30, alpha: 10 },
    ];
    let layer = flare(&stamp, &rings, 0.0).unwrap();
    let [p1, _] = layout.positions();
    assert_eq!(layer.pixel(p1.x as u32, p1.y as u32), [10, 10, 10, 10]);
    assert_eq!(
        layer.pixel(p1.x as u32 + 20, p1.y as u32),
        [10, 10, 10, 10]
    );
}

#[test]
fn stripes_repeat_with_spacing() {
    let canvas = Canvas::new(120, 4).unwrap();
    let layer = stripes(canvas, Rgba8::opaque(34, 139, 34), 50, 2).unwrap();
    for x in [0u32, 1, 50, 51, 100, 101] {
        assert_eq!(layer.pixel(x, 2)[3], 255);
    }
    for x in [2u32, 49, 52, 99] {
        assert_eq!(layer.pixel(x, 2)[3], 0);
    }
    assert!(stripes(canvas, Rgba8::WHITE, 0, 2).is_err());
}

#[test]
fn tint_covers_canvas() {
    let canvas = Canvas::new(4, 4).unwrap();
    let layer = tint(canvas, Rgba8::new(245, 240, 230, 60));
    assert!(layer.premul().pixels().all(|p| p.0 == Rgba8::new(245, 240, 230, 60).to_premul()));
}
