use std::ffi::{c_void, CStr, CString};
use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasRawWindowHandle;
use tracing::{debug, error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

use crate::app::{App, FrameTarget, SessionState};
use crate::error::SetupError;
use crate::gpu::GlApi;
use crate::gui::settings_panel;
use crate::input::{translate_window_event, InputEvent, LoopState};
use crate::runtime::{FrameStats, SystemTimeSource};
use crate::types::{DemoConfig, PixelSize};

/// Window, GL surface and GL context.
///
/// Field order is drop order: the context goes before the surface it was made
/// current on, and both go before the window.
pub(crate) struct GlWindow {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    /// Opens the window and makes a core-profile context current on it.
    pub(crate) fn new(
        event_loop: &EventLoop<()>,
        config: &DemoConfig,
    ) -> Result<(Self, glow::Context), SetupError> {
        let (width, height) = config.window_size;
        let builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(true);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(builder))
            .build(event_loop, template, pick_config)
            .map_err(|err| SetupError::init(format!("failed to create window: {err}")))?;
        let window =
            window.ok_or_else(|| SetupError::init("display builder returned no window"))?;

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(window.raw_window_handle()));

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|err| SetupError::init(format!("failed to create GL context: {err}")))?;

        let surface_attributes = window.build_surface_attributes(Default::default());
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|err| SetupError::init(format!("failed to create GL surface: {err}")))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|err| SetupError::init(format!("failed to make context current: {err}")))?;

        if config.vsync {
            if let Err(err) =
                surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("failed to enable vsync: {err}");
            }
        }

        let missing = missing_gl_symbols(|symbol| display.get_proc_address(symbol));
        if !missing.is_empty() {
            return Err(SetupError::init(format!(
                "failed to load the OpenGL function table (missing {})",
                missing.join(", ")
            )));
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| match CString::new(symbol) {
                Ok(symbol) => display.get_proc_address(&symbol),
                Err(_) => std::ptr::null(),
            })
        };

        let info = GlApi::context_info(&gl);
        info!(
            vendor = %info.vendor,
            renderer = %info.renderer,
            version = %info.version,
            glsl = %info.glsl_version,
            "OpenGL context ready"
        );

        Ok((
            Self {
                context,
                surface,
                window,
            },
            gl,
        ))
    }

    fn pixel_size(&self) -> PixelSize {
        let size = self.window.inner_size();
        PixelSize::new(size.width, size.height)
    }

    /// Some platforms (Wayland, macOS) only pick up a new size on request.
    fn resize_surface(&self) {
        let size = self.pixel_size();
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
    }
}

/// Entry points the demo cannot run without; `glGetString` is called first.
const REQUIRED_GL_SYMBOLS: [&str; 5] = [
    "glGetString",
    "glCreateShader",
    "glCreateProgram",
    "glGenVertexArrays",
    "glDrawArrays",
];

/// Names from [`REQUIRED_GL_SYMBOLS`] that `lookup` resolves to null.
fn missing_gl_symbols<F>(mut lookup: F) -> Vec<&'static str>
where
    F: FnMut(&CStr) -> *const c_void,
{
    REQUIRED_GL_SYMBOLS
        .into_iter()
        .filter(|name| match CString::new(*name) {
            Ok(symbol) => lookup(&symbol).is_null(),
            Err(_) => true,
        })
        .collect()
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() > best.num_samples() {
                candidate
            } else {
                best
            }
        })
        .expect("display offered no GL configs")
}

/// The real [`FrameTarget`]: a window plus an optional egui overlay.
struct WindowTarget {
    gl_window: GlWindow,
    gui: Option<egui_glow::EguiGlow>,
}

impl WindowTarget {
    /// Gives the GUI first look at a window event.
    fn forward(&mut self, event: &WindowEvent) {
        if let Some(gui) = self.gui.as_mut() {
            let response = gui.on_window_event(&self.gl_window.window, event);
            if response.consumed {
                debug!(?event, "event consumed by gui");
            }
        }
    }

    fn destroy_gui(&mut self) {
        if let Some(mut gui) = self.gui.take() {
            gui.destroy();
        }
    }
}

impl FrameTarget for WindowTarget {
    fn pixel_size(&self) -> PixelSize {
        self.gl_window.pixel_size()
    }

    fn gui_wants_keyboard(&self) -> bool {
        self.gui
            .as_ref()
            .is_some_and(|gui| gui.egui_ctx.wants_keyboard_input())
    }

    fn run_gui(&mut self, session: &mut SessionState, stats: &FrameStats) {
        if let Some(gui) = self.gui.as_mut() {
            gui.run(&self.gl_window.window, |ctx| {
                settings_panel(ctx, session, stats)
            });
        }
    }

    fn paint_gui(&mut self) {
        if let Some(gui) = self.gui.as_mut() {
            gui.paint(&self.gl_window.window);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.gl_window
            .surface
            .swap_buffers(&self.gl_window.context)
            .context("failed to swap buffers")
    }
}

/// Runs the demo until the window closes or escape is pressed.
///
/// Setup happens in order (window and context, shaders, geometry); teardown
/// runs in reverse once the event loop returns.
pub(crate) fn run(config: &DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let (gl_window, gl) = GlWindow::new(&event_loop, config)?;
    let gl = Arc::new(gl);

    let gui = if config.gui_enabled {
        let window_target: &EventLoopWindowTarget<()> = &event_loop;
        Some(egui_glow::EguiGlow::new(window_target, gl.clone(), None, None))
    } else {
        None
    };
    let mut target = WindowTarget { gl_window, gui };

    let mut app = match App::new(&*gl, config, Box::new(SystemTimeSource::new())) {
        Ok(app) => app,
        Err(err) => {
            target.destroy_gui();
            return Err(err).context("failed to prepare triangle pipeline");
        }
    };
    app.sync_viewport(&*gl, target.pixel_size());
    app.restart_clock();
    info!(
        title = %config.title,
        gui = config.gui_enabled,
        "entering frame loop"
    );

    let mut pending: Vec<InputEvent> = Vec::new();
    let mut failure: Option<anyhow::Error> = None;
    let window_id = target.gl_window.window.id();

    let run_result = event_loop.run(|event, elwt| match event {
        Event::WindowEvent {
            window_id: id,
            event,
        } if id == window_id => {
            target.forward(&event);
            if let Some(input) = translate_window_event(&event) {
                if input.changes_pixel_size() {
                    target.gl_window.resize_surface();
                }
                pending.push(input);
            }
        }
        Event::AboutToWait => match app.pump(&*gl, &mut target, pending.drain(..)) {
            Ok(LoopState::Running) => {}
            Ok(LoopState::Terminating) => elwt.exit(),
            Err(err) => {
                error!("frame failed: {err:?}");
                failure = Some(err);
                elwt.exit();
            }
        },
        _ => {}
    });

    target.destroy_gui();
    app.teardown(&*gl);
    drop(target);
    info!("shutdown complete");

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))?;
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
