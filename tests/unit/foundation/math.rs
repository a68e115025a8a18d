use super::*;

#[test]
fn lerp_hits_endpoints_exactly() {
    for &(a, b) in &[(1.0, 3.0), (0.1, 0.7), (-2.5, 9.25)] {
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }
    assert!((lerp(1.0, 3.0, 0.5) - 2.0).abs() < 1e-12);
}

#[test]
fn clamp01_handles_nan_and_out_of_range() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn axis_count_with_half_step_offset() {
    assert_eq!(axis_count(64.0, 8.0, 16.0), 4);
    assert_eq!(axis_count(65.0, 8.0, 16.0), 4);
    assert_eq!(axis_count(73.0, 8.0, 16.0), 5);
    assert_eq!(axis_count(8.0, 8.0, 16.0), 0);
    assert_eq!(axis_count(64.0, 8.0, 0.0), 0);
    assert_eq!(axis_count(f64::INFINITY, 8.0, 16.0), 0);
}
