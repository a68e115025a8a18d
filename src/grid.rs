//! Pure dot-grid composition.
//!
//! [`compose_frame`] turns (surface size, config, pointer) into a [`DrawList`]. Nothing here
//! touches a real drawing context, so every visual rule is testable by inspecting commands.

use crate::color::{Rgb8, lerp_rgb, sample_gradient};
use crate::config::{DotGridConfig, DrawEffect, MAX_BLUR, MIN_GAP};
use crate::foundation::core::Point;
use crate::foundation::math::{axis_count, clamp01, lerp};
use crate::surface::SurfaceSize;
use crate::trail::Trail;

/// One drawing primitive, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface to transparent.
    Clear,
    /// Blur everything drawn after this command (canvas `filter: blur(...)`).
    Blur { radius_px: f64 },
    /// Filled circle.
    Dot {
        center: Point,
        radius: f64,
        color: Rgb8,
    },
    /// Round-capped line segment of the pointer trail.
    TrailSegment {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb8,
    },
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// `(center, radius, color)` of every dot, in draw order.
    pub fn dots(&self) -> impl Iterator<Item = (Point, f64, Rgb8)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Dot {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            _ => None,
        })
    }

    pub fn dot_count(&self) -> usize {
        self.dots().count()
    }

    /// The dot drawn closest to `p`.
    pub fn dot_nearest(&self, p: Point) -> Option<(Point, f64, Rgb8)> {
        self.dots().min_by(|a, b| a.0.distance(p).total_cmp(&b.0.distance(p)))
    }

    pub fn trail_segments(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::TrailSegment { .. }))
    }

    pub fn blur_radius(&self) -> Option<f64> {
        self.commands.iter().find_map(|c| match *c {
            DrawCommand::Blur { radius_px } => Some(radius_px),
            _ => None,
        })
    }
}

/// Grid points covering `width x height`, starting at a half-gap offset, row-major.
pub fn grid_points(width: f64, height: f64, gap: f64) -> impl Iterator<Item = Point> {
    let half = gap * 0.5;
    let cols = axis_count(width, half, gap);
    let rows = axis_count(height, half, gap);
    (0..rows).flat_map(move |j| {
        let y = half + j as f64 * gap;
        (0..cols).map(move |i| Point::new(half + i as f64 * gap, y))
    })
}

/// Radius and color of the dot at `at`.
///
/// `pointer` is the device-pixel position currently influencing the grid. When it is `None`
/// the configured idle effect decides.
pub fn dot_style(
    at: Point,
    size: SurfaceSize,
    config: &DotGridConfig,
    pointer: Option<Point>,
) -> (f64, Rgb8) {
    let base = config.base_radius * size.ratio;
    let max = config.max_radius * size.ratio;

    let t = match (pointer, config.draw_effect) {
        (Some(p), _) => {
            let reach = config.reach * size.ratio;
            let d = p.distance(at);
            if d >= reach {
                return (base, config.static_color);
            }
            1.0 - d / reach
        }
        (None, DrawEffect::FishEye) => {
            let half_diag = size.half_diagonal();
            if half_diag <= 0.0 {
                return (max, config.static_color);
            }
            let n = clamp01(size.center().distance(at) / half_diag);
            let radius = lerp(base, max, 1.0 - n).clamp(base, max);
            return (radius, lerp_rgb(config.static_color, config.active_color, n));
        }
        (None, DrawEffect::Normal) => return (base, config.static_color),
    };

    let t = clamp01(t);
    let radius = lerp(base, max, t).clamp(base, max);
    (radius, lerp_rgb(config.static_color, config.active_color, t))
}

/// Upper bound on the preallocated command count.
const CAPACITY_HINT_MAX: usize = 1 << 16;

/// Compose one frame: clear, optional blur, grid dots, then the trail head to tail.
///
/// `gap` and `blur` are clamped to [`MIN_GAP`] and [`MAX_BLUR`], so an unvalidated config
/// still yields a bounded frame.
pub fn compose_frame(
    size: SurfaceSize,
    config: &DotGridConfig,
    pointer: Option<Point>,
    trail: &Trail,
) -> DrawList {
    let gap = config.gap.max(MIN_GAP) * size.ratio;
    let dots = axis_count(f64::from(size.width), gap * 0.5, gap)
        .saturating_mul(axis_count(f64::from(size.height), gap * 0.5, gap));
    let mut commands =
        Vec::with_capacity(dots.saturating_add(2 + trail.len()).min(CAPACITY_HINT_MAX));

    commands.push(DrawCommand::Clear);
    if config.blur > 0.0 {
        commands.push(DrawCommand::Blur {
            radius_px: config.blur.min(MAX_BLUR) * size.ratio,
        });
    }

    for at in grid_points(f64::from(size.width), f64::from(size.height), gap) {
        let (radius, color) = dot_style(at, size, config, pointer);
        commands.push(DrawCommand::Dot {
            center: at,
            radius,
            color,
        });
    }

    if config.trailing && trail.len() >= 2 {
        let n = (trail.len() - 1) as f64;
        let head_width = 2.0 * config.trailing_radius * size.ratio;
        for (i, (from, to)) in trail.segments().enumerate() {
            let f = i as f64 / n;
            let color = sample_gradient(&config.trailing_gradient, f)
                .unwrap_or(config.trailing_color);
            commands.push(DrawCommand::TrailSegment {
                from,
                to,
                width: (head_width * (1.0 - f)).max(1.0),
                color,
            });
        }
    }

    DrawList {
        width: size.width,
        height: size.height,
        commands,
    }
}

#[cfg(test)]
#[path = "../tests/unit/grid.rs"]
mod tests;
