use std::fmt;
use std::path::{Path, PathBuf};

/// Straight (non-premultiplied) RGBA color as edited by the settings panel.
pub type Rgba = [f32; 4];

/// Background color used before the user touches the settings panel.
pub const DEFAULT_CLEAR_COLOR: Rgba = [0.1, 0.1, 0.12, 1.0];

/// Triangle color used before the user touches the settings panel.
pub const DEFAULT_SHAPE_COLOR: Rgba = [1.0, 0.5, 0.1, 1.0];

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Where the GLSL for one stage comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// GLSL embedded in the binary.
    Builtin,
    /// Plain-text GLSL read relative to the working directory at start-up.
    File(PathBuf),
}

impl ShaderSource {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

/// Vertex and fragment sources for the triangle program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

impl ShaderSources {
    /// Both stages from the embedded GLSL.
    pub fn builtin() -> Self {
        Self {
            vertex: ShaderSource::Builtin,
            fragment: ShaderSource::Builtin,
        }
    }
}

impl Default for ShaderSources {
    /// The on-disk shaders shipped next to the binary.
    fn default() -> Self {
        Self {
            vertex: ShaderSource::file("shaders/vertex.glsl"),
            fragment: ShaderSource::file("shaders/fragment.glsl"),
        }
    }
}

/// Drawable size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport rectangle covering the whole drawable.
    pub fn viewport(self) -> Viewport {
        Viewport {
            x: 0,
            y: 0,
            width: i32::try_from(self.width).unwrap_or(i32::MAX),
            height: i32::try_from(self.height).unwrap_or(i32::MAX),
        }
    }
}

/// GL viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Immutable configuration passed to the renderer at start-up.
///
/// Nothing here is read from the command line: every invocation runs the same
/// demo. The fields exist so tests and embedders can swap the shader sources or
/// drop the GUI overlay.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Window title.
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: (u32, u32),
    /// Requested OpenGL core-profile version.
    pub gl_version: (u8, u8),
    /// Present with swap interval 1.
    pub vsync: bool,
    /// Draw the settings panel on top of the triangle.
    pub gui_enabled: bool,
    /// GLSL for the triangle program.
    pub shaders: ShaderSources,
    /// Initial framebuffer clear color.
    pub clear_color: Rgba,
    /// Initial triangle color.
    pub shape_color: Rgba,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Dematik".to_string(),
            window_size: (1024, 768),
            gl_version: (3, 3),
            vsync: true,
            gui_enabled: true,
            shaders: ShaderSources::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
            shape_color: DEFAULT_SHAPE_COLOR,
        }
    }
}
