use crate::action::Action;
use crate::key::{Key, KeyboardState};
use sandbox_common::{MovementInput, PointerEvent};

/// Who owns the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Cursor visible and free; the overlay receives mouse input and the
    /// camera ignores both mouse and movement keys.
    #[default]
    Ui,
    /// Cursor grabbed; mouse deltas and movement keys drive the camera.
    Look,
}

impl CursorMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ui => Self::Look,
            Self::Look => Self::Ui,
        }
    }
}

/// A raw, windowing-library independent input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    /// Relative mouse motion in pixels; positive `dy` is screen-down.
    MouseMotion { dx: f32, dy: f32 },
    /// Wheel delta in lines; positive scrolls away from the user.
    MouseWheel { delta: f32 },
    Resized { width: u32, height: u32 },
    FocusLost,
    CloseRequested,
}

/// Window-level consequences of this frame's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSignal {
    Resized { width: u32, height: u32 },
    Quit,
}

/// Collects one frame of input and hands it out as explicit messages.
///
/// Events are pushed as they arrive; the frame loop then reads
/// [`pointer_events`](Self::pointer_events), [`movement`](Self::movement),
/// [`actions`](Self::actions) and [`signals`](Self::signals), and calls
/// [`finish_frame`](Self::finish_frame) once the frame has been rendered.
#[derive(Debug, Default)]
pub struct InputCollector {
    keyboard: KeyboardState,
    cursor: CursorMode,
    pointer: Vec<PointerEvent>,
    actions: Vec<Action>,
    signals: Vec<WindowSignal>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => {
                let was_pressed = self.keyboard.is_pressed(key);
                self.keyboard.set(key, pressed);
                if pressed && !was_pressed {
                    if let Some(action) = Action::for_key(key) {
                        tracing::debug!("action {action:?} from {key:?}");
                        self.actions.push(action);
                    }
                }
            }
            InputEvent::MouseMotion { dx, dy } => {
                if self.cursor == CursorMode::Look {
                    self.pointer.push(PointerEvent::Look {
                        x_offset: dx,
                        y_offset: -dy,
                    });
                }
            }
            InputEvent::MouseWheel { delta } => {
                if self.cursor == CursorMode::Look {
                    self.pointer.push(PointerEvent::Scroll(delta));
                }
            }
            InputEvent::Resized { width, height } => {
                self.signals.push(WindowSignal::Resized { width, height });
            }
            InputEvent::FocusLost => self.keyboard.clear(),
            InputEvent::CloseRequested => self.signals.push(WindowSignal::Quit),
        }
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        if mode != self.cursor {
            tracing::debug!("cursor mode {:?} -> {mode:?}", self.cursor);
            self.cursor = mode;
            // drop deltas gathered under the old owner
            self.pointer.clear();
        }
    }

    pub fn toggle_cursor_mode(&mut self) -> CursorMode {
        self.set_cursor_mode(self.cursor.toggled());
        self.cursor
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Look and scroll events for the camera, in arrival order.
    pub fn pointer_events(&self) -> &[PointerEvent] {
        &self.pointer
    }

    /// Movement keys held this frame; idle while the UI owns the cursor.
    pub fn movement(&self) -> MovementInput {
        match self.cursor {
            CursorMode::Look => self.keyboard.movement(),
            CursorMode::Ui => MovementInput::default(),
        }
    }

    /// Actions triggered since the last [`finish_frame`](Self::finish_frame).
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn signals(&self) -> &[WindowSignal] {
        &self.signals
    }

    /// Clear per-frame queues and roll the key state forward.
    pub fn finish_frame(&mut self) {
        self.pointer.clear();
        self.actions.clear();
        self.signals.clear();
        self.keyboard.advance();
    }
}
