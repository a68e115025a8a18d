use crate::foundation::core::Point;

/// Backing-buffer size of a drawing surface, in device pixels, plus the ratio it was derived
/// with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Device pixels per CSS pixel.
    pub ratio: f64,
}

impl SurfaceSize {
    /// Size the backing buffer for an element displayed at `display_width x display_height` CSS
    /// pixels on a display with the given device pixel ratio.
    pub fn from_display(display_width: f64, display_height: f64, ratio: f64) -> Self {
        let ratio = normalize_ratio(ratio);
        Self {
            width: scale_extent(display_width, ratio),
            height: scale_extent(display_height, ratio),
            ratio,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert an element-local CSS position into device pixels.
    pub fn to_device(self, css: Point) -> Point {
        Point::new(css.x * self.ratio, css.y * self.ratio)
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    /// Distance from the center to a corner.
    pub fn half_diagonal(self) -> f64 {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        0.5 * (w * w + h * h).sqrt()
    }
}

/// Non-finite or non-positive ratios fall back to `1.0`.
pub fn normalize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn scale_extent(css: f64, ratio: f64) -> u32 {
    let px = css * ratio;
    if !px.is_finite() || px <= 0.0 {
        return 0;
    }
    px.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../tests/unit/surface.rs"]
mod tests;
