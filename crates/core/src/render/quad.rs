//! Geometry Buffer: the static full-viewport quad.
//!
//! Four NDC vertices drawn as a triangle strip cover `[-1, 1] x [-1, 1]`,
//! so the fragment stage runs once per output pixel. Uploaded once at
//! setup; nothing about it changes per frame.

/// `(-1, 1), (-1, -1), (1, 1), (1, -1)`: two triangles sharing the diagonal.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0];
/// Vertices per draw.
pub const QUAD_VERTEX_COUNT: i32 = 4;
/// Components per vertex.
pub const QUAD_COMPONENTS: i32 = 2;

/// Vertex buffer plus vertex array describing [`QUAD_VERTICES`].
pub struct QuadBuffer {
    vbo: glow::Buffer,
    vao: glow::VertexArray,
}

impl QuadBuffer {
    /// Allocates the buffer, uploads the vertices, and wires them to the
    /// attribute at `position_location`.
    ///
    /// # Errors
    ///
    /// Returns the driver message if the buffer or vertex array cannot be created.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, position_location: u32) -> Result<Self, String> {
        use glow::HasContext;

        // SAFETY: glow marks raw GL calls unsafe. Handles are freshly created
        // and the VBO is released if the VAO cannot be made.
        let vbo = unsafe { gl.create_buffer()? };
        let vao = match unsafe { gl.create_vertex_array() } {
            Ok(vao) => vao,
            Err(e) => {
                unsafe { gl.delete_buffer(vbo) };
                return Err(e);
            }
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(position_location);
            gl.vertex_attrib_pointer_f32(
                position_location,
                QUAD_COMPONENTS,
                glow::FLOAT,
                false,
                QUAD_COMPONENTS * std::mem::size_of::<f32>() as i32,
                0,
            );
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        log::debug!("quad geometry uploaded ({QUAD_VERTEX_COUNT} vertices)");
        Ok(Self { vbo, vao })
    }

    /// Draws the quad as a triangle strip with whatever program is bound.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.vao is a live vertex array created in new().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, QUAD_VERTEX_COUNT);
        }
    }

    #[allow(unsafe_code)]
    pub fn delete(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: called once by the owner when tearing down.
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}
