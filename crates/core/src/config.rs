//! Startup parameters for a metaball run.
//!
//! A [`RendererConfig`] captures everything needed to reproduce a run:
//! viewport size, population size, PRNG seed, and the ranges the initial
//! radii and velocities are drawn from. Two identical configs spawn
//! bit-identical source sets.

use crate::error::MetaballError;
use crate::params::{param_f64, param_u64};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Population size of the reference scene.
pub const DEFAULT_SOURCE_COUNT: usize = 30;
/// Upper bound on the population: the GLSL ES 3.00 guaranteed minimum of
/// fragment uniform vectors, one `vec3` per source.
pub const MAX_SOURCES: usize = 224;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_RADIUS_MIN: f32 = 10.0;
const DEFAULT_RADIUS_MAX: f32 = 70.0;
const DEFAULT_MAX_SPEED: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    /// Number of sources. Baked into the fragment shader.
    pub count: usize,
    pub seed: u64,
    /// Initial radii are drawn from `[radius_min, radius_max)`.
    pub radius_min: f32,
    pub radius_max: f32,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`, in pixels per tick.
    pub max_speed: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            count: DEFAULT_SOURCE_COUNT,
            seed: DEFAULT_SEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl RendererConfig {
    /// Default config at the given resolution.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Overlays the keys present in `params` on `self`.
    ///
    /// Unknown keys are ignored and mistyped values keep the current value.
    /// Call [`validate`](Self::validate) afterwards.
    pub fn merge_json(&self, params: &Value) -> Self {
        Self {
            width: param_u64(params, "width", self.width.into())
                .try_into()
                .unwrap_or(self.width),
            height: param_u64(params, "height", self.height.into())
                .try_into()
                .unwrap_or(self.height),
            count: param_u64(params, "count", self.count as u64)
                .try_into()
                .unwrap_or(self.count),
            seed: param_u64(params, "seed", self.seed),
            radius_min: param_f64(params, "radius_min", self.radius_min.into()) as f32,
            radius_max: param_f64(params, "radius_max", self.radius_max.into()) as f32,
            max_speed: param_f64(params, "max_speed", self.max_speed.into()) as f32,
        }
    }

    /// Default config overlaid with `params`.
    pub fn from_json(params: &Value) -> Self {
        Self::default().merge_json(params)
    }

    /// The validated viewport.
    pub fn viewport(&self) -> Result<Viewport, MetaballError> {
        Viewport::new(self.width, self.height)
    }

    /// Checks every field is usable for spawning and shader generation.
    pub fn validate(&self) -> Result<(), MetaballError> {
        self.viewport()?;
        if self.count == 0 || self.count > MAX_SOURCES {
            return Err(MetaballError::InvalidSourceCount {
                count: self.count,
                max: MAX_SOURCES,
            });
        }
        if !(self.radius_min.is_finite() && self.radius_min > 0.0) {
            return Err(MetaballError::InvalidConfig(format!(
                "radius_min must be positive, got {}",
                self.radius_min
            )));
        }
        if !self.radius_max.is_finite() || self.radius_max < self.radius_min {
            return Err(MetaballError::InvalidConfig(format!(
                "radius_max ({}) must be at least radius_min ({})",
                self.radius_max, self.radius_min
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(MetaballError::InvalidConfig(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_matches_reference_scene() {
        let cfg = RendererConfig::default();
        assert_eq!(cfg.count, 30);
        assert_eq!(cfg.radius_min, 10.0);
        assert_eq!(cfg.radius_max, 70.0);
        assert_eq!(cfg.max_speed, 5.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_json_overrides_present_keys_only() {
        let cfg = RendererConfig::from_json(&json!({
            "width": 320,
            "count": 8,
            "max_speed": 1.5,
            "unknown": true
        }));
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.height, DEFAULT_HEIGHT);
        assert_eq!(cfg.count, 8);
        assert_eq!(cfg.max_speed, 1.5);
        assert_eq!(cfg.seed, DEFAULT_SEED);
    }

    #[test]
    fn merge_json_keeps_current_value_on_out_of_range_width() {
        let base = RendererConfig::with_size(100, 100);
        let cfg = base.merge_json(&json!({"width": u64::MAX}));
        assert_eq!(cfg.width, 100);
    }

    #[test]
    fn json_round_trip() {
        let mut cfg = RendererConfig::with_size(256, 128);
        cfg.seed = 8675309;
        let text = serde_json::to_string(&cfg).unwrap();
        let restored: RendererConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(cfg, restored);
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let cfg: RendererConfig = serde_json::from_str(r#"{"width": 64}"#).unwrap();
        assert_eq!(cfg.width, 64);
        assert_eq!(cfg.count, DEFAULT_SOURCE_COUNT);
    }

    #[test]
    fn validate_rejects_zero_dimension() {
        let cfg = RendererConfig::with_size(0, 100);
        assert!(matches!(cfg.validate(), Err(MetaballError::InvalidDimensions)));
    }

    #[test]
    fn validate_rejects_empty_and_oversized_population() {
        let mut cfg = RendererConfig::default();
        cfg.count = 0;
        assert!(matches!(
            cfg.validate(),
            Err(MetaballError::InvalidSourceCount { count: 0, .. })
        ));
        cfg.count = MAX_SOURCES + 1;
        assert!(matches!(
            cfg.validate(),
            Err(MetaballError::InvalidSourceCount { .. })
        ));
        cfg.count = MAX_SOURCES;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_radius_range() {
        let mut cfg = RendererConfig::default();
        cfg.radius_min = 0.0;
        assert!(matches!(cfg.validate(), Err(MetaballError::InvalidConfig(_))));

        let mut cfg = RendererConfig::default();
        cfg.radius_min = 20.0;
        cfg.radius_max = 10.0;
        assert!(matches!(cfg.validate(), Err(MetaballError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_negative_or_nan_speed() {
        let mut cfg = RendererConfig::default();
        cfg.max_speed = -1.0;
        assert!(cfg.validate().is_err());
        cfg.max_speed = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}
