#![deny(unsafe_code)]
//! Headless rendering for the metaball renderer.
//!
//! [`HeadlessBackend`] plugs into [`RenderLoop`](metaball_core::RenderLoop)
//! in place of a GL context. It keeps what the GPU would have drawn and
//! rasterizes it on the CPU with the same field evaluation the fragment
//! stage runs, so frames can be inspected or written to disk without a
//! display.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use metaball_core::{FrameBackend, Viewport};

/// CPU stand-in for the GL backend.
///
/// `upload` stores the packed array; `draw` freezes it as the drawn frame.
/// Rasterization is deferred to [`frame_rgba`](Self::frame_rgba).
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    viewport: Viewport,
    uploaded: Vec<f32>,
    drawn: Option<Vec<f32>>,
    frames_drawn: u64,
}

impl HeadlessBackend {
    /// A backend that has drawn nothing yet.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            uploaded: Vec::new(),
            drawn: None,
            frames_drawn: 0,
        }
    }

    /// Size of the frames [`frame_rgba`](Self::frame_rgba) produces.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of `draw` calls so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Packed uniforms of the last drawn frame.
    pub fn drawn_uniforms(&self) -> Option<&[f32]> {
        self.drawn.as_deref()
    }

    /// RGBA8 of the last drawn frame, or `None` before the first draw.
    pub fn frame_rgba(&self) -> Option<Vec<u8>> {
        self.drawn
            .as_deref()
            .map(|packed| pixel::rasterize(packed, self.viewport))
    }
}

impl FrameBackend for HeadlessBackend {
    fn upload(&mut self, packed: &[f32]) {
        self.uploaded.clear();
        self.uploaded.extend_from_slice(packed);
    }

    fn draw(&mut self) {
        self.drawn
            .get_or_insert_with(Vec::new)
            .clone_from(&self.uploaded);
        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use metaball_core::{
        pack_sources, FieldSource, FieldSourceSet, RenderLoop, RendererConfig, StopSignal,
    };

    fn set(viewport: Viewport) -> FieldSourceSet {
        FieldSourceSet::from_sources(
            viewport,
            vec![FieldSource::new(Vec2::new(20.0, 20.0), Vec2::new(1.0, 2.0), 10.0).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn no_frame_before_first_draw() {
        let backend = HeadlessBackend::new(Viewport::new(8, 8).unwrap());
        assert!(backend.frame_rgba().is_none());
        assert_eq!(backend.frames_drawn(), 0);
    }

    #[test]
    fn drawn_frame_reflects_latest_tick() {
        let vp = Viewport::new(64, 64).unwrap();
        let mut lp = RenderLoop::new(set(vp), HeadlessBackend::new(vp));
        lp.tick();
        lp.tick();

        let mut expected = set(vp);
        expected.update();
        expected.update();
        let backend = lp.backend();
        assert_eq!(backend.frames_drawn(), 2);
        assert_eq!(backend.drawn_uniforms(), Some(pack_sources(&expected).as_slice()));
        assert_eq!(
            backend.frame_rgba().unwrap(),
            pixel::rasterize(&pack_sources(&expected), vp)
        );
    }

    #[test]
    fn upload_without_draw_does_not_change_drawn_frame() {
        let vp = Viewport::new(16, 16).unwrap();
        let mut backend = HeadlessBackend::new(vp);
        backend.upload(&[1.0, 2.0, 3.0]);
        backend.draw();
        backend.upload(&[4.0, 5.0, 6.0]);
        assert_eq!(backend.drawn_uniforms(), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn seeded_runs_render_identical_frames() {
        let cfg = RendererConfig::with_size(48, 32);
        let render = || {
            let sources = FieldSourceSet::spawn(&cfg).unwrap();
            let mut lp = RenderLoop::new(sources, HeadlessBackend::new(cfg.viewport().unwrap()));
            let stop = StopSignal::new();
            for _ in 0..10 {
                lp.step(&stop);
            }
            lp.backend().frame_rgba().unwrap()
        };
        assert_eq!(render(), render());
    }
}
