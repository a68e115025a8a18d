//! Visual parameters of a dot-grid instance.
//!
//! Configs are plain JSON with camelCase keys; every key is optional and falls back to
//! [`DotGridConfig::default`].

use crate::color::Rgb8;
use crate::foundation::error::{DotfieldError, DotfieldResult};
use serde::{Deserialize, Serialize};

/// Whether proximity effects need only hover or a press-and-hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimateMode {
    /// Always active while the pointer is over the surface.
    #[default]
    OnHover,
    /// Active only between pointer-down and pointer-up.
    OnAction,
}

impl AnimateMode {
    /// The `active` flag a pointer state returns to on leave/cancel.
    pub fn resting_active(self) -> bool {
        matches!(self, Self::OnHover)
    }
}

/// Rendering used when no pointer is influencing the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawEffect {
    #[default]
    Normal,
    /// Dot size and color vary with distance from the surface center.
    FishEye,
}

/// Smallest accepted `gap`, in CSS pixels.
pub const MIN_GAP: f64 = 0.5;
/// Largest accepted `blur`, in CSS pixels.
pub const MAX_BLUR: f64 = 64.0;

/// Immutable configuration for one mounted grid. Lengths are CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DotGridConfig {
    pub gap: f64,
    pub base_radius: f64,
    pub max_radius: f64,
    pub reach: f64,
    pub blur: f64,
    pub static_color: Rgb8,
    pub active_color: Rgb8,
    pub trailing: bool,
    pub trail_length: usize,
    pub min_trail_length: usize,
    /// Milliseconds of pointer inactivity before the trail starts to decay.
    pub trailing_lifetime: f64,
    pub trailing_radius: f64,
    pub trailing_color: Rgb8,
    /// Head-to-tail color stops. Overrides `trailing_color` when non-empty.
    pub trailing_gradient: Vec<Rgb8>,
    pub animate: AnimateMode,
    pub draw_effect: DrawEffect,
}

impl Default for DotGridConfig {
    fn default() -> Self {
        Self {
            gap: 16.0,
            base_radius: 1.0,
            max_radius: 3.0,
            reach: 80.0,
            blur: 0.0,
            static_color: Rgb8::new(0x52, 0x52, 0x5b),
            active_color: Rgb8::new(0xf9, 0x73, 0x16),
            trailing: false,
            trail_length: 24,
            min_trail_length: 1,
            trailing_lifetime: 120.0,
            trailing_radius: 3.0,
            trailing_color: Rgb8::new(0xf9, 0x73, 0x16),
            trailing_gradient: Vec::new(),
            animate: AnimateMode::OnHover,
            draw_effect: DrawEffect::Normal,
        }
    }
}

impl DotGridConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> DotfieldResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config from a reader.
    pub fn from_reader(r: impl std::io::Read) -> DotfieldResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs that cannot be drawn: non-finite lengths, inverted radii, a `gap` below
    /// [`MIN_GAP`] or a `blur` above [`MAX_BLUR`].
    pub fn validate(&self) -> DotfieldResult<()> {
        fn positive(name: &str, v: f64) -> DotfieldResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(DotfieldError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        fn non_negative(name: &str, v: f64) -> DotfieldResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(DotfieldError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        positive("gap", self.gap)?;
        if self.gap < MIN_GAP {
            return Err(DotfieldError::validation(format!("gap must be >= {MIN_GAP}")));
        }
        positive("reach", self.reach)?;
        non_negative("baseRadius", self.base_radius)?;
        non_negative("maxRadius", self.max_radius)?;
        if self.base_radius > self.max_radius {
            return Err(DotfieldError::validation(
                "baseRadius must be <= maxRadius",
            ));
        }
        non_negative("blur", self.blur)?;
        if self.blur > MAX_BLUR {
            return Err(DotfieldError::validation(format!("blur must be <= {MAX_BLUR}")));
        }
        non_negative("trailingLifetime", self.trailing_lifetime)?;
        non_negative("trailingRadius", self.trailing_radius)?;
        if self.trail_length == 0 {
            return Err(DotfieldError::validation("trailLength must be >= 1"));
        }
        if self.min_trail_length > self.trail_length {
            return Err(DotfieldError::validation(
                "minTrailLength must be <= trailLength",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
