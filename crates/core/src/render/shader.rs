//! Program Builder: compiles and links the two shader stages and resolves
//! the program's named bindings.
//!
//! The compile/link/lookup functions need a live `glow::Context`; they run
//! against WebGL2 in the wasm crate's browser tests. Error formatting, the
//! status-to-error mapping, and the binding check are pure.

use std::fmt;
use thiserror::Error;

/// Which stage of the program a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The matching GL shader type constant.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Kind of named program binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Attribute,
    Uniform,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Attribute => f.write_str("attribute"),
            BindingKind::Uniform => f.write_str("uniform"),
        }
    }
}

/// Fatal errors raised while building the program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        stage: ShaderStage,
        /// Numbered source followed by the driver's info log.
        log: String,
    },
    /// The compiled stages failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
    /// The linked program has no active binding with this name; the
    /// shader text and the CPU-side names disagree.
    #[error("{kind} '{name}' not found in linked program")]
    BindingNotFound { kind: BindingKind, name: String },
}

/// Prepends right-aligned line numbers to `source` and appends `log`, so
/// driver messages that cite line numbers can be read against the text.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Turns a binding lookup result into a `Result`, naming what was missing.
pub fn require_binding<T>(kind: BindingKind, name: &str, found: Option<T>) -> Result<T, ShaderError> {
    found.ok_or_else(|| ShaderError::BindingNotFound {
        kind,
        name: name.to_string(),
    })
}

/// Maps a stage's compile status to the builder's result, reading the
/// driver log only on failure.
pub fn compile_result(
    stage: ShaderStage,
    source: &str,
    compiled: bool,
    info_log: impl FnOnce() -> String,
) -> Result<(), ShaderError> {
    if compiled {
        return Ok(());
    }
    Err(ShaderError::CompileError {
        stage,
        log: format_shader_error(source, &info_log()),
    })
}

/// Maps a program's link status to the builder's result.
pub fn link_result(linked: bool, info_log: impl FnOnce() -> String) -> Result<(), ShaderError> {
    if linked {
        Ok(())
    } else {
        Err(ShaderError::LinkError(info_log()))
    }
}

/// Compiles a single stage.
///
/// # Errors
///
/// `ShaderError::CompileError` carrying the stage and the numbered source
/// plus driver log. The shader object is deleted on failure.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow marks raw GL calls unsafe. The stage constant is valid and
    // the shader handle is deleted on every failure path.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|log| ShaderError::CompileError { stage, log })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let compiled = unsafe { gl.get_shader_compile_status(shader) };
    match compile_result(stage, source, compiled, || unsafe { gl.get_shader_info_log(shader) }) {
        Ok(()) => Ok(shader),
        Err(e) => {
            unsafe { gl.delete_shader(shader) };
            Err(e)
        }
    }
}

/// Links compiled vertex and fragment shaders into a program.
///
/// # Errors
///
/// `ShaderError::LinkError` with the driver's program info log.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: both shader handles come from successful compile_shader calls;
    // the program is deleted if linking fails.
    let program = unsafe { gl.create_program().map_err(ShaderError::LinkError)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    let linked = unsafe { gl.get_program_link_status(program) };
    match link_result(linked, || unsafe { gl.get_program_info_log(program) }) {
        Ok(()) => Ok(program),
        Err(e) => {
            unsafe { gl.delete_program(program) };
            Err(e)
        }
    }
}

/// Compiles both stages and links them. Stage objects are released
/// whatever the outcome.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vert = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let frag = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a live shader from the call above.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    let result = link_program(gl, vert, frag);

    // SAFETY: the linked program keeps what it needs; the stage objects can go.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}

/// A linked program, built once and never recompiled.
pub struct ShaderProgram {
    program: glow::Program,
}

impl ShaderProgram {
    /// Compiles and links `vertex_src` + `fragment_src`.
    pub fn build(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let program = compile_program(gl, vertex_src, fragment_src)?;
        log::info!("metaball program linked");
        Ok(Self { program })
    }

    /// The underlying GL program handle.
    pub fn raw(&self) -> glow::Program {
        self.program
    }

    /// Location of an active vertex attribute.
    ///
    /// # Errors
    ///
    /// `ShaderError::BindingNotFound` if the program has no such attribute.
    #[allow(unsafe_code)]
    pub fn attrib_location(&self, gl: &glow::Context, name: &str) -> Result<u32, ShaderError> {
        use glow::HasContext;
        // SAFETY: self.program is a live, linked program.
        let found = unsafe { gl.get_attrib_location(self.program, name) };
        require_binding(BindingKind::Attribute, name, found)
    }

    /// Location of an active uniform.
    ///
    /// # Errors
    ///
    /// `ShaderError::BindingNotFound` if the program has no such uniform.
    #[allow(unsafe_code)]
    pub fn uniform_location(
        &self,
        gl: &glow::Context,
        name: &str,
    ) -> Result<glow::UniformLocation, ShaderError> {
        use glow::HasContext;
        // SAFETY: self.program is a live, linked program.
        let found = unsafe { gl.get_uniform_location(self.program, name) };
        require_binding(BindingKind::Uniform, name, found)
    }

    /// Makes this the current program.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.program is a live, linked program.
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Releases the program. Called once by the owner.
    #[allow(unsafe_code)]
    pub fn delete(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: called once by the owner when tearing down.
        unsafe { gl.delete_program(self.program) };
    }
}
