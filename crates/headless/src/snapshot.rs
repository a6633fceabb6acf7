//! PNG output of a rasterized frame.
//!
//! Behind the `png` feature (default on) so consumers that only need the
//! RGBA buffer do not pull in `image`.

use metaball_core::{MetaballError, Viewport};
use std::path::Path;

/// Writes an RGBA8 buffer produced by [`rasterize`](crate::pixel::rasterize) as a PNG.
///
/// Returns `MetaballError::Io` if the buffer size does not match the
/// viewport or the write fails.
pub fn write_png(rgba: Vec<u8>, viewport: Viewport, path: &Path) -> Result<(), MetaballError> {
    let img = image::RgbaImage::from_raw(viewport.width(), viewport.height(), rgba)
        .ok_or_else(|| MetaballError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| MetaballError::Io(e.to_string()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
