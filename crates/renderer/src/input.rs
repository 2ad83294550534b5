use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Window-system input the demo itself reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// Escape went down (repeats included).
    EscapePressed,
    /// Logical window size changed.
    Resized,
    /// Drawable pixel size changed without a logical resize, e.g. on a
    /// scale-factor change.
    PixelSizeChanged,
}

impl InputEvent {
    pub fn changes_pixel_size(self) -> bool {
        matches!(self, InputEvent::Resized | InputEvent::PixelSizeChanged)
    }
}

/// Maps a `winit` window event onto the demo's input vocabulary.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),
        WindowEvent::KeyboardInput { event, .. } if is_escape_press(event) => {
            Some(InputEvent::EscapePressed)
        }
        WindowEvent::Resized(_) => Some(InputEvent::Resized),
        WindowEvent::ScaleFactorChanged { .. } => Some(InputEvent::PixelSizeChanged),
        _ => None,
    }
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && matches!(event.logical_key, Key::Named(NamedKey::Escape))
}

/// Frame loop state. `Terminating` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Terminating,
}

impl LoopState {
    /// Next state after `event`.
    ///
    /// Escape only quits while the GUI leaves the keyboard to the demo.
    pub fn on_event(self, event: InputEvent, gui_wants_keyboard: bool) -> Self {
        match (self, event) {
            (LoopState::Terminating, _) => LoopState::Terminating,
            (LoopState::Running, InputEvent::Quit) => LoopState::Terminating,
            (LoopState::Running, InputEvent::EscapePressed) if !gui_wants_keyboard => {
                LoopState::Terminating
            }
            (LoopState::Running, _) => LoopState::Running,
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}
