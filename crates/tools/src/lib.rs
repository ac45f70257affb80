//! Developer tooling: camera inspection and tuning, shortcut table, frame
//! statistics. Everything here is UI-agnostic; the desktop overlay and the
//! CLI render it their own way.

mod inspector;
mod stats;

pub use inspector::{
    CameraInspector, CameraSummary, CameraTuning, SENSITIVITY_RANGE, SPEED_RANGE, ZOOM_RANGE,
};
pub use stats::FrameStats;

/// A global keyboard shortcut and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub keys: &'static str,
    pub description: &'static str,
}

pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        keys: "U",
        description: "Toggle wireframe mode",
    },
    Shortcut {
        keys: "I",
        description: "Toggle UI and capture mouse",
    },
    Shortcut {
        keys: "Esc",
        description: "Quit",
    },
    Shortcut {
        keys: "W A S D",
        description: "Move camera (while mouse is captured)",
    },
];
