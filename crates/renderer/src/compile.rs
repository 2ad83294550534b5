use std::fs;
use std::path::Path;

use tracing::{debug, error};

use crate::error::SetupError;
use crate::gpu::GlApi;
use crate::types::{ShaderSource, ShaderStage};

/// Reads a GLSL file relative to the working directory.
pub fn load_shader_source(path: &Path) -> Result<String, SetupError> {
    fs::read_to_string(path).map_err(|source| SetupError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Produces the GLSL text for `stage`, reading it from disk when needed.
pub fn resolve_source(stage: ShaderStage, source: &ShaderSource) -> Result<String, SetupError> {
    match source {
        ShaderSource::Builtin => Ok(builtin_source(stage).to_string()),
        ShaderSource::File(path) => {
            let text = load_shader_source(path)?;
            debug!(%stage, path = %path.display(), bytes = text.len(), "loaded shader source");
            Ok(text)
        }
    }
}

/// Embedded GLSL for `stage`.
pub fn builtin_source(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => VERTEX_SHADER_GLSL,
        ShaderStage::Fragment => FRAGMENT_SHADER_GLSL,
    }
}

/// Compiles one shader object.
///
/// On a rejected compile the driver log is returned in the error and the
/// shader object is deleted, so nothing leaks on the failure path.
pub fn compile_shader<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, SetupError> {
    let shader = gl
        .create_shader(stage)
        .map_err(|err| SetupError::init(format!("failed to create {stage} shader: {err}")))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        error!(%stage, "shader compile error: {log}");
        gl.delete_shader(shader);
        return Err(SetupError::Compile { stage, log });
    }

    Ok(shader)
}

/// Links two compiled shader objects into a program.
///
/// Both shaders are detached once linking succeeds; deleting them is left to
/// the caller. A failed link deletes the program.
pub fn link_program<G: GlApi>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, SetupError> {
    let program = gl
        .create_program()
        .map_err(|err| SetupError::init(format!("failed to create program: {err}")))?;
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if !gl.program_link_status(program) {
        let log = gl.program_info_log(program);
        error!("program link error: {log}");
        gl.delete_program(program);
        return Err(SetupError::Link { log });
    }

    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);
    Ok(program)
}

/// Rotates the input position by `uAngle` radians around the origin.
const VERTEX_SHADER_GLSL: &str = r"#version 330 core
layout(location = 0) in vec2 aPos;

uniform float uAngle;

void main() {
    float c = cos(uAngle);
    float s = sin(uAngle);
    mat2 rotation = mat2(c, s, -s, c);
    gl_Position = vec4(rotation * aPos, 0.0, 1.0);
}
";

/// Flat fill with the host-supplied `uColor`.
const FRAGMENT_SHADER_GLSL: &str = r"#version 330 core
out vec4 FragColor;

uniform vec4 uColor;

void main() {
    FragColor = uColor;
}
";
