//! CPU evaluation of the implicit surface.
//!
//! These functions compute, for one fragment coordinate, exactly what the
//! fragment stage in [`shader_source`](crate::shader_source) computes. They
//! read the packed uniform layout so a headless rasterizer sees the same
//! inputs the GPU does.
//!
//! The field at `(x, y)` is `sum_i s_i^2 / ((x - x_i)^2 + (y - y_i)^2)`.
//! A pixel lies on the surface when the sum reaches [`SURFACE_THRESHOLD`].

use crate::uniforms::FLOATS_PER_SOURCE;
use crate::viewport::Viewport;

/// Field value at which a pixel becomes surface.
pub const SURFACE_THRESHOLD: f32 = 0.99;
/// How fast the edge darkening fades as the sum climbs past the threshold.
pub const EDGE_BLEND_SCALE: f32 = 100.0;

/// Sum of every packed source's contribution at `(x, y)`.
///
/// A coordinate exactly on a source centre yields `+inf`, which classifies
/// as surface. Trailing floats that do not form a full triple are ignored.
pub fn field_sum(packed: &[f32], x: f32, y: f32) -> f32 {
    packed
        .chunks_exact(FLOATS_PER_SOURCE)
        .map(|ball| {
            let dx = ball[0] - x;
            let dy = ball[1] - y;
            let strength = ball[2];
            (strength * strength) / (dx * dx + dy * dy)
        })
        .sum()
}

/// Whether a pixel with this field sum is on or inside the surface.
pub fn is_surface(sum: f32) -> bool {
    sum >= SURFACE_THRESHOLD
}

/// Weight of black in the surface colour: 1 at the threshold, 0 once the
/// sum is 0.01 above it.
pub fn edge_blend(sum: f32) -> f32 {
    (1.0 - (sum - SURFACE_THRESHOLD) * EDGE_BLEND_SCALE).max(0.0)
}

/// Linear RGB for a fragment at `(x, y)` whose field sum is `sum`.
///
/// Background is black. Surface pixels mix the coordinate gradient
/// `(x / width, y / height, 1)` toward black by [`edge_blend`].
pub fn shade(x: f32, y: f32, sum: f32, viewport: Viewport) -> [f32; 3] {
    if !is_surface(sum) {
        return [0.0, 0.0, 0.0];
    }
    let extent = viewport.extent();
    let base = [x / extent.x, y / extent.y, 1.0];
    let keep = 1.0 - edge_blend(sum);
    base.map(|c| c * keep)
}
