//! Fixed output resolution shared by the kinematics and the fragment stage.

use crate::error::MetaballError;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Largest accepted width or height, a common `GL_MAX_VIEWPORT_DIMS`.
pub const MAX_DIMENSION: u32 = 16384;

/// Immutable `(width, height)` in pixels, fixed at startup.
///
/// The same pair bounds the source kinematics and is baked into the
/// fragment shader as compile-time constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `MetaballError::InvalidDimensions` if either side is zero or
    /// larger than [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self, MetaballError> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(MetaballError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as floats, for per-axis bound checks.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Converts a top-left based point (DOM mouse offsets, image rows) into
    /// the bottom-left space sources and fragment coordinates use.
    pub fn from_top_left(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, self.height as f32 - y)
    }

    /// Number of pixels the fragment stage runs for each frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_positive_dimensions() {
        let vp = Viewport::new(640, 480).unwrap();
        assert_eq!(vp.width(), 640);
        assert_eq!(vp.height(), 480);
        assert_eq!(vp.extent(), Vec2::new(640.0, 480.0));
        assert_eq!(vp.pixel_count(), 640 * 480);
    }

    #[test]
    fn new_rejects_zero_width_or_height() {
        assert!(matches!(
            Viewport::new(0, 10),
            Err(MetaballError::InvalidDimensions)
        ));
        assert!(matches!(
            Viewport::new(10, 0),
            Err(MetaballError::InvalidDimensions)
        ));
    }

    #[test]
    fn from_top_left_flips_only_y() {
        let vp = Viewport::new(200, 100).unwrap();
        assert_eq!(vp.from_top_left(30.0, 0.0), Vec2::new(30.0, 100.0));
        assert_eq!(vp.from_top_left(30.0, 75.0), Vec2::new(30.0, 25.0));
        assert_eq!(vp.from_top_left(0.0, 100.0), Vec2::ZERO);
    }

    #[test]
    fn new_rejects_dimensions_beyond_gl_limit() {
        assert!(Viewport::new(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        for (w, h) in [(MAX_DIMENSION + 1, 10), (10, 100_000), (u32::MAX, u32::MAX)] {
            assert!(
                matches!(Viewport::new(w, h), Err(MetaballError::InvalidDimensions)),
                "{w}x{h} should be rejected"
            );
        }
    }
}
