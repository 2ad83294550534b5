use std::fmt;

use tracing::debug;

use crate::compile::{compile_shader, link_program, resolve_source};
use crate::error::SetupError;
use crate::types::{Rgba, ShaderSources, ShaderStage};

use super::backend::GlApi;

/// Rotation angle in radians, fed from elapsed seconds.
pub const ANGLE_UNIFORM: &str = "uAngle";
/// Fill color of the triangle.
pub const COLOR_UNIFORM: &str = "uColor";

/// The linked triangle program.
///
/// Only the program object outlives construction; the stage shaders are
/// deleted as soon as linking has been attempted.
pub struct ShaderProgram<G: GlApi> {
    program: G::Program,
}

impl<G: GlApi> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .finish()
    }
}

impl<G: GlApi> ShaderProgram<G> {
    /// Resolves, compiles, and links both stages.
    pub fn from_sources(gl: &G, sources: &ShaderSources) -> Result<Self, SetupError> {
        let vertex = resolve_source(ShaderStage::Vertex, &sources.vertex)?;
        let fragment = resolve_source(ShaderStage::Fragment, &sources.fragment)?;
        Self::new(gl, &vertex, &fragment)
    }

    pub fn new(gl: &G, vertex_source: &str, fragment_source: &str) -> Result<Self, SetupError> {
        let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let linked = link_program(gl, vertex, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        let program = linked?;
        debug!(?program, "linked triangle program");
        Ok(Self { program })
    }

    pub fn handle(&self) -> G::Program {
        self.program
    }

    /// Makes the program current and writes the per-frame uniforms.
    ///
    /// Locations are looked up by name every call. A name the driver does not
    /// know resolves to no location and the write is ignored.
    pub fn bind(&self, gl: &G, angle: f32, color: Rgba) {
        gl.use_program(Some(self.program));
        let angle_location = gl.uniform_location(self.program, ANGLE_UNIFORM);
        gl.uniform_f32(angle_location.as_ref(), angle);
        let color_location = gl.uniform_location(self.program, COLOR_UNIFORM);
        gl.uniform_vec4(color_location.as_ref(), color);
    }

    pub fn destroy(self, gl: &G) {
        gl.delete_program(self.program);
    }
}
