//! Uniform Uploader: sends the packed source array to the program's
//! `metaballs` slot.

use super::shader::{ShaderError, ShaderProgram};
use crate::uniforms::METABALLS_UNIFORM;

/// Holds the `metaballs` uniform location, resolved once at setup.
pub struct UniformUploader {
    location: glow::UniformLocation,
}

impl UniformUploader {
    /// # Errors
    ///
    /// `ShaderError::BindingNotFound` if the program lacks `metaballs`.
    pub fn new(gl: &glow::Context, program: &ShaderProgram) -> Result<Self, ShaderError> {
        let location = program.uniform_location(gl, METABALLS_UNIFORM)?;
        log::debug!("resolved uniform '{METABALLS_UNIFORM}'");
        Ok(Self { location })
    }

    /// Uploads `packed` as a `vec3` array. The owning program must be bound.
    #[allow(unsafe_code)]
    pub fn upload(&self, gl: &glow::Context, packed: &[f32]) {
        use glow::HasContext;
        // SAFETY: the location belongs to the currently bound program and
        // `packed` holds whole vec3 triples.
        unsafe { gl.uniform_3_f32_slice(Some(&self.location), packed) };
    }
}
