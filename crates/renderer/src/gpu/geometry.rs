use std::fmt;
use std::mem::size_of;

use crate::error::SetupError;

use super::backend::GlApi;

/// Clip-space positions of the demo triangle: top, left, right.
pub const TRIANGLE_VERTICES: [[f32; 2]; 3] = [[0.0, 0.5], [-0.5, -0.5], [0.5, -0.5]];

const POSITION_ATTRIBUTE: u32 = 0;
const VERTEX_STRIDE: i32 = (2 * size_of::<f32>()) as i32;

/// Vertex array plus the buffer backing it. Uploaded once, never mutated.
pub struct TriangleGeometry<G: GlApi> {
    vertex_array: G::VertexArray,
    buffer: G::Buffer,
    vertex_count: i32,
}

impl<G: GlApi> fmt::Debug for TriangleGeometry<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriangleGeometry")
            .field("vertex_array", &self.vertex_array)
            .field("buffer", &self.buffer)
            .field("vertex_count", &self.vertex_count)
            .finish()
    }
}

impl<G: GlApi> TriangleGeometry<G> {
    /// Creates the vertex array and buffer, uploads [`TRIANGLE_VERTICES`], and
    /// describes attribute 0 while both are bound.
    pub fn upload(gl: &G) -> Result<Self, SetupError> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|err| SetupError::init(format!("failed to create vertex array: {err}")))?;
        let buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_vertex_array(vertex_array);
                return Err(SetupError::init(format!(
                    "failed to create vertex buffer: {err}"
                )));
            }
        };

        gl.bind_vertex_array(Some(vertex_array));
        gl.bind_array_buffer(Some(buffer));
        gl.array_buffer_data(bytemuck::cast_slice(&TRIANGLE_VERTICES));
        gl.describe_vec2_attribute(POSITION_ATTRIBUTE, VERTEX_STRIDE, 0);
        gl.bind_vertex_array(None);
        gl.bind_array_buffer(None);

        Ok(Self {
            vertex_array,
            buffer,
            vertex_count: TRIANGLE_VERTICES.len() as i32,
        })
    }

    /// Issues the single non-indexed triangle draw and unbinds afterwards.
    pub fn draw(&self, gl: &G) {
        gl.bind_vertex_array(Some(self.vertex_array));
        gl.draw_triangles(0, self.vertex_count);
        gl.bind_vertex_array(None);
    }

    /// Releases the buffer, then the vertex array (reverse of creation).
    pub fn destroy(self, gl: &G) {
        gl.delete_buffer(self.buffer);
        gl.delete_vertex_array(self.vertex_array);
    }
}
