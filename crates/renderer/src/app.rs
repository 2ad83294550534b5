use anyhow::Result;
use tracing::{debug, trace_span};

use crate::error::SetupError;
use crate::gpu::{GlApi, ShaderProgram, TriangleGeometry};
use crate::input::{InputEvent, LoopState};
use crate::runtime::{BoxedTimeSource, FrameStats, TimeSample};
use crate::types::{DemoConfig, PixelSize, Rgba, DEFAULT_CLEAR_COLOR, DEFAULT_SHAPE_COLOR};

/// Values the settings panel edits live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    pub clear_color: Rgba,
    pub shape_color: Rgba,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            shape_color: DEFAULT_SHAPE_COLOR,
        }
    }
}

impl SessionState {
    pub fn from_config(config: &DemoConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            shape_color: config.shape_color,
        }
    }
}

/// The window, GUI, and swap chain as seen from the frame loop.
pub trait FrameTarget {
    /// Current drawable size in physical pixels.
    fn pixel_size(&self) -> PixelSize;
    /// Whether a GUI widget currently holds keyboard focus.
    fn gui_wants_keyboard(&self) -> bool;
    /// Begins a GUI frame and lays out the widgets.
    fn run_gui(&mut self, session: &mut SessionState, stats: &FrameStats);
    /// Paints the GUI laid out by the last `run_gui`.
    fn paint_gui(&mut self);
    /// Presents the back buffer.
    fn present(&mut self) -> Result<()>;
}

/// Everything the frame loop owns between setup and teardown.
pub struct App<G: GlApi> {
    program: ShaderProgram<G>,
    geometry: TriangleGeometry<G>,
    session: SessionState,
    state: LoopState,
    time: BoxedTimeSource,
    stats: FrameStats,
}

impl<G: GlApi> App<G> {
    /// Builds the shader program, then the geometry.
    ///
    /// If geometry setup fails the program is released before returning.
    pub fn new(gl: &G, config: &DemoConfig, time: BoxedTimeSource) -> Result<Self, SetupError> {
        let program = ShaderProgram::from_sources(gl, &config.shaders)?;
        let geometry = match TriangleGeometry::upload(gl) {
            Ok(geometry) => geometry,
            Err(err) => {
                program.destroy(gl);
                return Err(err);
            }
        };

        Ok(Self {
            program,
            geometry,
            session: SessionState::from_config(config),
            state: LoopState::Running,
            time,
            stats: FrameStats::new(),
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Matches the viewport to the drawable pixel size.
    pub fn sync_viewport(&self, gl: &G, size: PixelSize) {
        let viewport = size.viewport();
        debug!(width = viewport.width, height = viewport.height, "viewport updated");
        gl.viewport(viewport);
    }

    /// Restarts elapsed time and the frame statistics, so setup cost does not
    /// show up as rotation or as a slow first frame.
    pub fn restart_clock(&mut self) {
        self.time.reset();
        self.stats = FrameStats::new();
    }

    /// Applies one input event and returns the resulting loop state.
    pub fn handle_event<T: FrameTarget>(
        &mut self,
        gl: &G,
        event: InputEvent,
        target: &T,
    ) -> LoopState {
        if event.changes_pixel_size() {
            self.sync_viewport(gl, target.pixel_size());
        }
        let next = self.state.on_event(event, target.gui_wants_keyboard());
        if next != self.state {
            debug!(?event, "frame loop terminating");
        }
        self.state = next;
        next
    }

    /// Draws and presents one frame.
    pub fn render_frame<T: FrameTarget>(&mut self, gl: &G, target: &mut T) -> Result<TimeSample> {
        let _frame = trace_span!("frame").entered();

        target.run_gui(&mut self.session, &self.stats);

        let sample = self.time.sample();
        self.stats.record(sample);

        gl.clear_color_buffer(self.session.clear_color);
        self.program.bind(gl, sample.seconds, self.session.shape_color);
        self.geometry.draw(gl);

        target.paint_gui();
        target.present()?;
        Ok(sample)
    }

    /// One loop iteration: drain `events`, then draw unless a quit arrived.
    pub fn pump<T, I>(&mut self, gl: &G, target: &mut T, events: I) -> Result<LoopState>
    where
        T: FrameTarget,
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(gl, event, target);
        }
        if self.state.is_running() {
            self.render_frame(gl, target)?;
        }
        Ok(self.state)
    }

    /// Releases the GPU objects in reverse acquisition order.
    pub fn teardown(self, gl: &G) {
        self.geometry.destroy(gl);
        self.program.destroy(gl);
    }
}
