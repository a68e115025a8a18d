use super::*;
use crate::config::AnimateMode;

fn size(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize {
        width: w,
        height: h,
        ratio: 1.0,
    }
}

fn scenario_cfg() -> DotGridConfig {
    DotGridConfig {
        gap: 16.0,
        base_radius: 1.0,
        max_radius: 3.0,
        reach: 80.0,
        ..DotGridConfig::default()
    }
}

#[test]
fn dot_count_matches_floor_product() {
    let cfg = scenario_cfg();
    for &(w, h) in &[(320u32, 160u32), (100, 37), (15, 200), (1, 1), (513, 257)] {
        let list = compose_frame(size(w, h), &cfg, None, &Trail::new());
        let expected = (w as usize / 16) * (h as usize / 16);
        let got = list.dot_count();
        let cols = w as usize / 16 + 1;
        let rows = h as usize / 16 + 1;
        assert!(got >= expected && got <= cols * rows, "{w}x{h}: {got} vs {expected}");
    }

    // Multiples of the gap are exact.
    let list = compose_frame(size(320, 160), &cfg, None, &Trail::new());
    assert_eq!(list.dot_count(), 20 * 10);
}

#[test]
fn grid_starts_at_half_gap() {
    let pts: Vec<_> = grid_points(48.0, 16.0, 16.0).collect();
    assert_eq!(
        pts,
        vec![Point::new(8.0, 8.0), Point::new(24.0, 8.0), Point::new(40.0, 8.0)]
    );
}

#[test]
fn pointer_on_grid_point_gives_max_radius_and_active_color() {
    let cfg = scenario_cfg();
    let at = Point::new(8.0 + 16.0 * 3.0, 8.0 + 16.0 * 2.0);
    let list = compose_frame(size(256, 128), &cfg, Some(at), &Trail::new());
    let (center, radius, color) = list.dot_nearest(at).unwrap();
    assert_eq!(center, at);
    assert_eq!(radius, 3.0);
    assert_eq!(color, cfg.active_color);
}

#[test]
fn radius_is_base_at_or_beyond_reach() {
    let cfg = scenario_cfg();
    let s = size(400, 400);
    let at = Point::new(200.0, 200.0);
    for d in [80.0, 80.0001, 120.0, 1e6] {
        let (r, c) = dot_style(at, s, &cfg, Some(Point::new(200.0 + d, 200.0)));
        assert_eq!(r, 1.0);
        assert_eq!(c, cfg.static_color);
    }
    let (r, _) = dot_style(at, s, &cfg, Some(at));
    assert_eq!(r, 3.0);
}

#[test]
fn radius_always_within_bounds() {
    let cfg = scenario_cfg();
    let pointer = Point::new(77.0, 41.0);
    let list = compose_frame(size(300, 200), &cfg, Some(pointer), &Trail::new());
    for (_, r, _) in list.dots() {
        assert!((1.0..=3.0).contains(&r), "radius {r}");
    }
    let mid = dot_style(Point::new(40.0, 0.0), size(300, 200), &cfg, Some(Point::ZERO));
    assert!((mid.0 - 2.0).abs() < 1e-12);
}

#[test]
fn geometry_scales_with_device_ratio() {
    let cfg = scenario_cfg();
    let hi = SurfaceSize::from_display(160.0, 80.0, 2.0);
    let list = compose_frame(hi, &cfg, None, &Trail::new());
    assert_eq!(list.dot_count(), 10 * 5);
    let (first, r, _) = list.dots().next().unwrap();
    assert_eq!(first, Point::new(16.0, 16.0));
    assert_eq!(r, 2.0);
}

#[test]
fn fish_eye_only_without_pointer() {
    let cfg = DotGridConfig {
        draw_effect: DrawEffect::FishEye,
        ..scenario_cfg()
    };
    let s = size(320, 320);
    let idle = compose_frame(s, &cfg, None, &Trail::new());

    let (center_dot, center_r, center_c) = idle.dot_nearest(s.center()).unwrap();
    let (_, corner_r, corner_c) = idle.dot_nearest(Point::new(0.0, 0.0)).unwrap();
    assert!(center_r > corner_r);
    let dist = |c: Rgb8| {
        let s = cfg.static_color;
        (i32::from(c.r) - i32::from(s.r)).abs()
            + (i32::from(c.g) - i32::from(s.g)).abs()
            + (i32::from(c.b) - i32::from(s.b)).abs()
    };
    assert!(dist(center_c) < dist(corner_c));
    assert!(center_dot.distance(s.center()) < 16.0);

    // A far-away pointer disables the lens: every dot is at rest.
    let far = compose_frame(s, &cfg, Some(Point::new(-1000.0, -1000.0)), &Trail::new());
    assert!(far.dots().all(|(_, r, c)| r == 1.0 && c == cfg.static_color));
}

#[test]
fn draw_order_clear_blur_dots_trail() {
    let cfg = DotGridConfig {
        blur: 2.0,
        trailing: true,
        animate: AnimateMode::OnHover,
        ..scenario_cfg()
    };
    let trail = Trail::from_points(
        [Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(30.0, 10.0)],
        8,
    );
    let list = compose_frame(size(64, 64), &cfg, Some(Point::new(10.0, 10.0)), &trail);

    assert_eq!(list.commands[0], DrawCommand::Clear);
    assert_eq!(list.commands[1], DrawCommand::Blur { radius_px: 2.0 });
    assert_eq!(list.blur_radius(), Some(2.0));
    let first_seg = list
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::TrailSegment { .. }))
        .unwrap();
    assert!(list.commands[first_seg..]
        .iter()
        .all(|c| matches!(c, DrawCommand::TrailSegment { .. })));
    assert_eq!(list.trail_segments().count(), 2);
}

#[test]
fn trail_tapers_from_head_to_tail() {
    let cfg = DotGridConfig {
        trailing: true,
        trailing_radius: 4.0,
        trailing_gradient: vec![Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)],
        ..scenario_cfg()
    };
    let trail = Trail::from_points((0..5).map(|i| Point::new(i as f64 * 5.0, 0.0)), 8);
    let list = compose_frame(size(32, 32), &cfg, None, &trail);

    let segs: Vec<_> = list
        .trail_segments()
        .map(|c| match *c {
            DrawCommand::TrailSegment {
                from, width, color, ..
            } => (from, width, color),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(segs.len(), 4);
    assert_eq!(segs[0].0, Point::new(0.0, 0.0));
    assert_eq!(segs[0].1, 8.0);
    assert_eq!(segs[0].2, Rgb8::new(255, 0, 0));
    for w in segs.windows(2) {
        assert!(w[0].1 >= w[1].1);
    }
    assert!(segs.iter().all(|s| s.1 >= 1.0));
}

#[test]
fn single_point_trail_draws_nothing() {
    let cfg = DotGridConfig {
        trailing: true,
        ..scenario_cfg()
    };
    let trail = Trail::from_points([Point::new(1.0, 1.0)], 8);
    let list = compose_frame(size(32, 32), &cfg, None, &trail);
    assert_eq!(list.trail_segments().count(), 0);
}

#[test]
fn empty_surface_has_no_dots() {
    let list = compose_frame(size(0, 0), &scenario_cfg(), None, &Trail::new());
    assert_eq!(list.commands, vec![DrawCommand::Clear]);
}

#[test]
fn unvalidated_gap_and_blur_are_clamped() {
    let cfg = DotGridConfig {
        gap: 1e-300,
        blur: 1e12,
        ..scenario_cfg()
    };
    let list = compose_frame(size(64, 64), &cfg, None, &Trail::new());
    // 64 / MIN_GAP columns and rows.
    assert_eq!(list.dot_count(), 128 * 128);
    assert_eq!(list.blur_radius(), Some(MAX_BLUR));
}
