use super::*;

#[test]
fn backing_buffer_scales_with_ratio() {
    let s = SurfaceSize::from_display(320.0, 200.0, 2.0);
    assert_eq!((s.width, s.height), (640, 400));
    assert_eq!(s.ratio, 2.0);

    let s = SurfaceSize::from_display(101.0, 33.0, 1.5);
    assert_eq!((s.width, s.height), (152, 50));
}

#[test]
fn invalid_ratio_falls_back_to_one() {
    for r in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let s = SurfaceSize::from_display(10.0, 20.0, r);
        assert_eq!(s.ratio, 1.0);
        assert_eq!((s.width, s.height), (10, 20));
    }
}

#[test]
fn degenerate_display_sizes_are_empty() {
    assert!(SurfaceSize::from_display(0.0, 20.0, 1.0).is_empty());
    assert!(SurfaceSize::from_display(-5.0, 20.0, 1.0).is_empty());
    assert!(SurfaceSize::from_display(f64::NAN, 20.0, 1.0).is_empty());
    assert!(!SurfaceSize::from_display(1.0, 1.0, 1.0).is_empty());
}

#[test]
fn device_conversion_and_geometry() {
    let s = SurfaceSize::from_display(30.0, 40.0, 2.0);
    assert_eq!(s.to_device(Point::new(1.5, 2.0)), Point::new(3.0, 4.0));
    assert_eq!(s.center(), Point::new(30.0, 40.0));
    assert!((s.half_diagonal() - 50.0).abs() < 1e-12);
}
