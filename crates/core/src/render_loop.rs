//! The frame driver.
//!
//! One tick is strictly: advance the sources, pack them, upload the packed
//! array, draw. Ticks never overlap and each one sees the state the
//! previous one left. The loop runs until a caller-owned [`StopSignal`]
//! is raised; the host decides when the next tick happens.

use crate::source::FieldSourceSet;
use crate::uniforms::UniformPacker;
use glam::Vec2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where a tick's output goes: a GL context, or a CPU rasterizer.
///
/// Neither call can fail once the backend is constructed.
pub trait FrameBackend {
    /// Receives the full packed source array for the coming draw.
    fn upload(&mut self, packed: &[f32]);

    /// Draws one frame using the most recent upload.
    fn draw(&mut self);
}

/// Cancellation token checked at the top of every tick.
///
/// Clones share the flag, so the host can keep one and hand another to
/// the loop.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    /// A fresh, unraised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal; every clone observes it from the next tick on.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether [`stop`](Self::stop) has been called on any clone.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Outcome of [`RenderLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// A full tick ran; the host should schedule another.
    Ticked,
    /// The stop signal was raised; nothing ran.
    Stopped,
}

/// Owns the source set and drives its mutation, one tick per call.
pub struct RenderLoop<B> {
    sources: FieldSourceSet,
    packer: UniformPacker,
    backend: B,
    frame_index: u64,
    pointer: Option<Vec2>,
}

impl<B: FrameBackend> RenderLoop<B> {
    /// Takes ownership of the sources and the backend; no tick runs yet.
    pub fn new(sources: FieldSourceSet, backend: B) -> Self {
        let packer = UniformPacker::with_capacity(sources.len());
        Self {
            sources,
            packer,
            backend,
            frame_index: 0,
            pointer: None,
        }
    }

    /// Runs one tick unconditionally: update, upload, draw.
    pub fn tick(&mut self) {
        self.sources.update();
        let packed = self.packer.pack(&self.sources);
        self.backend.upload(packed);
        self.backend.draw();
        log::trace!("tick {} drawn", self.frame_index);
        self.frame_index += 1;
    }

    /// Runs one tick unless `stop` has been raised.
    pub fn step(&mut self, stop: &StopSignal) -> TickStatus {
        if stop.is_stopped() {
            return TickStatus::Stopped;
        }
        self.tick();
        TickStatus::Ticked
    }

    /// Ticks until `stop` is raised, calling `pace` after each tick with
    /// the number of ticks completed so far.
    ///
    /// `pace` is where the host waits for its next refresh; it may also
    /// raise `stop` itself.
    pub fn run_until_stopped(&mut self, stop: &StopSignal, mut pace: impl FnMut(u64)) {
        while self.step(stop) == TickStatus::Ticked {
            pace(self.frame_index);
        }
        log::debug!("render loop stopped after {} ticks", self.frame_index);
    }

    /// Ticks completed so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The source set as the last tick left it.
    pub fn sources(&self) -> &FieldSourceSet {
        &self.sources
    }

    /// The backend, for reading back what was drawn.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Records the latest cursor position. Nothing reads it during a tick.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Last cursor position seen, if any.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Ends the loop, handing back the advanced sources and the backend.
    pub fn into_parts(self) -> (FieldSourceSet, B) {
        (self.sources, self.backend)
    }
}
