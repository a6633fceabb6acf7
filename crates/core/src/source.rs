//! Field sources and their per-tick kinematics.
//!
//! A [`FieldSource`] is one circular influence point moving in viewport
//! pixel space. A [`FieldSourceSet`] holds the fixed population and
//! advances it one tick at a time with reflecting-boundary Euler steps.
//! Sources never interact; blobs merge visually only through the field sum.

use crate::config::RendererConfig;
use crate::error::MetaballError;
use crate::prng::Xorshift64;
use crate::viewport::Viewport;
use glam::Vec2;

/// Ratio between a source's field strength and its radius.
pub const STRENGTH_SCALE: f32 = 0.75;

/// One influence point.
///
/// `radius` drives boundary reflection; `strength` (derived once from the
/// radius) drives the field contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSource {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
    strength: f32,
}

impl FieldSource {
    /// Creates a source after checking every component is finite and the
    /// radius is strictly positive.
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Result<Self, MetaballError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MetaballError::InvalidSourceParameter {
                parameter: "radius",
                value: radius,
            });
        }
        check_finite("position.x", position.x)?;
        check_finite("position.y", position.y)?;
        check_finite("velocity.x", velocity.x)?;
        check_finite("velocity.y", velocity.y)?;
        Ok(Self {
            position,
            velocity,
            radius,
            strength: radius * STRENGTH_SCALE,
        })
    }

    /// Radius used for the boundary checks, fixed at construction.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Field-strength factor, `radius * 0.75`.
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Flips each velocity component whose axis is outside `[r, extent - r]`
    /// entering the tick, then moves by one tick of velocity.
    ///
    /// Deciding on the entering position flips a source just outside the
    /// bound whatever its speed. Flipping before the step sends a source
    /// that has just left straight back to where it left from, so it cannot
    /// get stuck oscillating outside. Position is never clamped.
    fn advance(&mut self, extent: Vec2) {
        let r = self.radius;
        if self.position.x < r || self.position.x > extent.x - r {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < r || self.position.y > extent.y - r {
            self.velocity.y = -self.velocity.y;
        }
        self.position += self.velocity;
    }
}

fn check_finite(parameter: &'static str, value: f32) -> Result<(), MetaballError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetaballError::InvalidSourceParameter { parameter, value })
    }
}

/// The fixed, ordered population of sources.
///
/// Order only determines the uniform slot each source is uploaded to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSourceSet {
    viewport: Viewport,
    sources: Vec<FieldSource>,
}

impl FieldSourceSet {
    /// Wraps an explicit list of sources.
    ///
    /// Returns `MetaballError::InvalidSourceCount` for an empty list.
    pub fn from_sources(
        viewport: Viewport,
        sources: Vec<FieldSource>,
    ) -> Result<Self, MetaballError> {
        if sources.is_empty() {
            return Err(MetaballError::InvalidSourceCount {
                count: 0,
                max: crate::config::MAX_SOURCES,
            });
        }
        Ok(Self { viewport, sources })
    }

    /// Spawns `config.count` sources from `config.seed`.
    ///
    /// Radius is drawn first, then the position per axis inside
    /// `[r, extent - r]`, then the velocity per axis.
    pub fn spawn(config: &RendererConfig) -> Result<Self, MetaballError> {
        config.validate()?;
        let viewport = config.viewport()?;
        let extent = viewport.extent();
        let mut rng = Xorshift64::new(config.seed);

        let sources = (0..config.count)
            .map(|_| {
                let radius = rng.next_range(config.radius_min, config.radius_max);
                let position = Vec2::new(
                    place_on_axis(&mut rng, radius, extent.x),
                    place_on_axis(&mut rng, radius, extent.y),
                );
                let velocity = Vec2::new(
                    rng.next_range(-config.max_speed, config.max_speed),
                    rng.next_range(-config.max_speed, config.max_speed),
                );
                FieldSource::new(position, velocity, radius)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "spawned {} field sources in {}x{} viewport (seed {})",
            sources.len(),
            viewport.width(),
            viewport.height(),
            config.seed
        );
        Self::from_sources(viewport, sources)
    }

    /// Advances every source by one tick.
    pub fn update(&mut self) {
        let extent = self.viewport.extent();
        for source in &mut self.sources {
            source.advance(extent);
        }
    }

    /// The bounds the sources reflect off.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of sources, fixed for the set's lifetime.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always `false` for a constructed set; provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in upload-slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSource> {
        self.sources.iter()
    }

    /// Sources in upload-slot order, as a slice.
    pub fn as_slice(&self) -> &[FieldSource] {
        &self.sources
    }
}

impl<'a> IntoIterator for &'a FieldSourceSet {
    type Item = &'a FieldSource;
    type IntoIter = std::slice::Iter<'a, FieldSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

/// Coordinate with the whole circle inside `[0, extent]`; centred when the
/// axis is narrower than the diameter.
fn place_on_axis(rng: &mut Xorshift64, radius: f32, extent: f32) -> f32 {
    let span = extent - 2.0 * radius;
    if span <= 0.0 {
        return extent * 0.5;
    }
    radius + rng.next_f32() * span
}
