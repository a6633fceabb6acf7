#![deny(unsafe_code)]
//! Core of the real-time metaball renderer.
//!
//! A fixed population of circular [`FieldSource`]s moves with
//! reflecting-boundary kinematics; every tick their positions and
//! strengths are packed into a `vec3` uniform array and a full-viewport
//! quad is drawn whose fragment stage thresholds the summed quadratic
//! falloff field.
//!
//! Without features this crate is pure CPU: config, kinematics, packing,
//! shader templating, CPU field evaluation, and the [`RenderLoop`]. The
//! `render` feature adds the `glow` program builder, geometry, uploader,
//! and the GL [`FrameBackend`].

pub mod config;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod render_loop;
pub mod shader_source;
pub mod source;
pub mod uniforms;
pub mod viewport;

#[cfg(feature = "render")]
pub mod render;

pub use config::{RendererConfig, MAX_SOURCES};
pub use error::MetaballError;
pub use render_loop::{FrameBackend, RenderLoop, StopSignal, TickStatus};
pub use shader_source::ShaderConstants;
pub use source::{FieldSource, FieldSourceSet};
pub use uniforms::{pack_sources, UniformPacker};
pub use viewport::{Viewport, MAX_DIMENSION};
