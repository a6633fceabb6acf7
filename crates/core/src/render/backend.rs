//! GL frame backend: owns the context and everything built on it.
//!
//! Setup order is program, then geometry, then uniform binding. Any failure
//! aborts construction; there is no partially working renderer.

use super::quad::QuadBuffer;
use super::shader::{ShaderError, ShaderProgram};
use super::uploader::UniformUploader;
use crate::render_loop::FrameBackend;
use crate::shader_source::{ShaderConstants, VERTEX_SHADER};
use crate::uniforms::POSITION_ATTRIBUTE;
use thiserror::Error;

/// Fatal setup failures. None of these leave a usable renderer behind.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// The quad's vertex buffer or vertex array could not be allocated.
    #[error("geometry buffer allocation failed: {0}")]
    Geometry(String),
}

/// Renders ticks into the context's default framebuffer.
pub struct GlBackend {
    gl: glow::Context,
    program: ShaderProgram,
    quad: QuadBuffer,
    uploader: UniformUploader,
}

impl GlBackend {
    /// Builds the program from [`VERTEX_SHADER`] and the fragment template
    /// rendered with `constants`, allocates the quad, resolves the uniform,
    /// and sets the GL viewport.
    ///
    /// # Errors
    ///
    /// `SetupError::Shader` for compile, link, or binding failures;
    /// `SetupError::Geometry` if the quad cannot be allocated.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context, constants: &ShaderConstants) -> Result<Self, SetupError> {
        use glow::HasContext;

        let fragment = constants.render_fragment();
        let program = ShaderProgram::build(&gl, VERTEX_SHADER, &fragment)?;

        let bindings = program
            .attrib_location(&gl, POSITION_ATTRIBUTE)
            .and_then(|position| {
                UniformUploader::new(&gl, &program).map(|uploader| (position, uploader))
            });
        let (position, uploader) = match bindings {
            Ok(b) => b,
            Err(e) => {
                program.delete(&gl);
                return Err(e.into());
            }
        };

        let quad = match QuadBuffer::new(&gl, position) {
            Ok(q) => q,
            Err(e) => {
                program.delete(&gl);
                return Err(SetupError::Geometry(e));
            }
        };

        let viewport = constants.viewport();
        // SAFETY: plain state setter on a live context.
        unsafe {
            gl.viewport(0, 0, viewport.width() as i32, viewport.height() as i32);
        }
        log::info!(
            "GL backend ready: {}x{}, {} sources",
            viewport.width(),
            viewport.height(),
            constants.count()
        );

        Ok(Self {
            gl,
            program,
            quad,
            uploader,
        })
    }

    /// The context the backend draws with.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl FrameBackend for GlBackend {
    fn upload(&mut self, packed: &[f32]) {
        self.program.bind(&self.gl);
        self.uploader.upload(&self.gl, packed);
    }

    fn draw(&mut self) {
        self.program.bind(&self.gl);
        self.quad.draw(&self.gl);
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        self.quad.delete(&self.gl);
        self.program.delete(&self.gl);
    }
}
