/// Linear interpolation written so that `t == 0` yields `a` and `t == 1` yields `b` exactly.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub(crate) fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Number of samples `offset + i * step` (i >= 0) that stay strictly below `extent`.
pub(crate) fn axis_count(extent: f64, offset: f64, step: f64) -> usize {
    if !(step > 0.0) || !extent.is_finite() || extent <= offset {
        return 0;
    }
    ((extent - offset) / step).ceil() as usize
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
