use std::time::Instant;

/// Number of frame deltas averaged for the performance readout.
pub const FRAME_STATS_WINDOW: usize = 60;

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed time in seconds since the source was created or reset.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    /// Creates a new time sample.
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource {
    /// Resets the source to its initial state.
    fn reset(&mut self);
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source initialised to `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that advances by a fixed step per frame.
///
/// Handy for deterministic rendering: the rotation reached after `n` frames is
/// always `n * step` radians.
#[derive(Debug, Clone, Copy)]
pub struct SteppedTimeSource {
    step: f32,
    frame: u64,
}

impl SteppedTimeSource {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
            frame: 0,
        }
    }
}

impl TimeSource for SteppedTimeSource {
    fn reset(&mut self) {
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.frame as f32 * self.step, self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource>;

/// Rolling frame-time average behind the "Application average" label.
#[derive(Debug, Clone)]
pub struct FrameStats {
    deltas: [f32; FRAME_STATS_WINDOW],
    next: usize,
    filled: usize,
    last_seconds: Option<f32>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            deltas: [0.0; FRAME_STATS_WINDOW],
            next: 0,
            filled: 0,
            last_seconds: None,
        }
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the elapsed time of the frame about to be drawn.
    ///
    /// The first sample only establishes a baseline.
    pub fn record(&mut self, sample: TimeSample) {
        if let Some(previous) = self.last_seconds.replace(sample.seconds) {
            let delta = (sample.seconds - previous).max(0.0);
            self.deltas[self.next] = delta;
            self.next = (self.next + 1) % FRAME_STATS_WINDOW;
            self.filled = (self.filled + 1).min(FRAME_STATS_WINDOW);
        }
    }

    /// Mean frame delta in milliseconds, or zero before two frames were seen.
    pub fn average_frame_ms(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        let total: f32 = self.deltas[..self.filled].iter().sum();
        total / self.filled as f32 * 1000.0
    }

    pub fn fps(&self) -> f32 {
        let ms = self.average_frame_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Application average {:.3} ms/frame ({:.1} FPS)",
            self.average_frame_ms(),
            self.fps()
        )
    }
}
