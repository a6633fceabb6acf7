//! WebGL2 / OpenGL ES 3.0 rendering through `glow`.
//!
//! Only available with the `render` feature.
//!
//! # Module overview
//!
//! - [`shader`] -- Program Builder: compile, link, binding lookup, error formatting.
//! - [`quad`] -- Geometry Buffer: the static full-viewport triangle strip.
//! - [`uploader`] -- Uniform Uploader: per-tick `uniform3fv` of the packed sources.
//! - [`backend`] -- `GlBackend`, the [`FrameBackend`](crate::FrameBackend) that owns all of the above.

pub mod backend;
pub mod quad;
pub mod shader;
pub mod uploader;

pub use backend::{GlBackend, SetupError};
pub use quad::{QuadBuffer, QUAD_VERTEX_COUNT, QUAD_VERTICES};
pub use shader::{
    compile_program, compile_result, compile_shader, format_shader_error, link_program,
    link_result, require_binding, BindingKind, ShaderError, ShaderProgram, ShaderStage,
};
pub use uploader::UniformUploader;
