//! Renderer crate for Dematik, a rotating-triangle OpenGL demo.
//!
//! The crate opens a window with a core-profile OpenGL context, compiles a
//! small shader program, and spins a single triangle while an egui settings
//! panel edits the clear and triangle colors live. The overall flow is:
//!
//! ```text
//!   dematik (CLI)
//!          │ DemoConfig
//!          ▼
//!   Renderer::run ──▶ GlWindow ──▶ winit event loop ──▶ App::pump()
//!                                                        │
//!                         InputEvent ─▶ LoopState ◀──────┤
//!                                                        └─▶ render_frame()
//!                                                             gui ─▶ clear ─▶ draw ─▶ paint ─▶ swap
//! ```
//!
//! `App` owns the GL objects and frame-loop state and talks to the GPU only
//! through [`gpu::GlApi`], so everything but the window driver runs against a
//! recording backend in tests. Teardown releases objects in reverse order of
//! creation once the event loop returns.

mod app;
mod compile;
mod error;
pub mod gpu;
mod gui;
mod input;
mod runtime;
mod types;
mod window;

use anyhow::Result;

pub use app::{App, FrameTarget, SessionState};
pub use compile::{builtin_source, compile_shader, link_program, load_shader_source};
pub use error::SetupError;
pub use gui::{settings_panel, SETTINGS_TITLE};
pub use input::{translate_window_event, InputEvent, LoopState};
pub use runtime::{
    BoxedTimeSource, FrameStats, SteppedTimeSource, SystemTimeSource, TimeSample, TimeSource,
    FRAME_STATS_WINDOW,
};
pub use types::{
    DemoConfig, PixelSize, Rgba, ShaderSource, ShaderSources, ShaderStage, Viewport,
    DEFAULT_CLEAR_COLOR, DEFAULT_SHAPE_COLOR,
};

/// Entry point used by the binary.
pub struct Renderer {
    config: DemoConfig,
}

impl Renderer {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    /// Runs the demo to completion. Returns once the window has closed and
    /// every GL object has been released.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
