//! RGBA8 rasterization of a packed source array.
//!
//! Always available (no feature gate) so the PNG path and any in-memory
//! consumer share the same conversion.

use metaball_core::field::{field_sum, shade};
use metaball_core::Viewport;

/// Evaluates every pixel as the fragment stage would and returns RGBA8
/// bytes, `width * height * 4` long.
///
/// Row 0 is the top of the image. Fragment coordinates have a bottom-left
/// origin and sample pixel centres, so pixel `(col, row)` is evaluated at
/// `(col + 0.5, height - row - 0.5)`.
pub fn rasterize(packed: &[f32], viewport: Viewport) -> Vec<u8> {
    let width = viewport.width();
    let height = viewport.height();
    let mut rgba = Vec::with_capacity(viewport.pixel_count() * 4);

    for row in 0..height {
        let y = (height - row) as f32 - 0.5;
        for col in 0..width {
            let x = col as f32 + 0.5;
            let sum = field_sum(packed, x, y);
            let [r, g, b] = shade(x, y, sum, viewport);
            rgba.extend_from_slice(&[to_u8(r), to_u8(g), to_u8(b), 255]);
        }
    }
    rgba
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], viewport: Viewport, col: u32, row: u32) -> [u8; 4] {
        let i = ((row * viewport.width() + col) * 4) as usize;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn buffer_has_four_bytes_per_pixel() {
        let vp = Viewport::new(7, 5).unwrap();
        assert_eq!(rasterize(&[3.0, 3.0, 1.0], vp).len(), 7 * 5 * 4);
    }

    #[test]
    fn alpha_is_always_opaque() {
        let vp = Viewport::new(16, 16).unwrap();
        let rgba = rasterize(&[8.0, 8.0, 4.0], vp);
        assert!(rgba.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn far_from_sources_is_black() {
        let vp = Viewport::new(64, 64).unwrap();
        let rgba = rasterize(&[60.0, 60.0, 2.0], vp);
        assert_eq!(pixel(&rgba, vp, 0, 63), [0, 0, 0, 255]);
    }

    #[test]
    fn rows_are_flipped_relative_to_fragment_coordinates() {
        // A strong source near the bottom of fragment space shows up in the
        // last image rows, not the first.
        let vp = Viewport::new(32, 32).unwrap();
        let rgba = rasterize(&[16.0, 2.0, 6.0], vp);
        let bottom = pixel(&rgba, vp, 16, 31);
        let top = pixel(&rgba, vp, 16, 0);
        assert_ne!(&bottom[..3], &[0, 0, 0], "bottom row should be surface");
        assert_eq!(top, [0, 0, 0, 255], "top row should be background");
    }

    #[test]
    fn surface_interior_carries_coordinate_gradient() {
        let vp = Viewport::new(100, 100).unwrap();
        let rgba = rasterize(&[75.5, 50.5, 40.0], vp);
        // Pixel centre (75.5, 49.5): deep inside, blue channel full.
        let p = pixel(&rgba, vp, 75, 50);
        assert_eq!(p[2], 255);
        assert_eq!(p[0], to_u8(75.5 / 100.0));
        assert_eq!(p[1], to_u8(49.5 / 100.0));
    }
}
