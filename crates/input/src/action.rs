use crate::key::Key;

/// A discrete application command triggered by a key press.
///
/// The frame loop consumes actions, never raw key codes, so rebinding a key
/// only touches [`Action::for_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Switch between filled and line polygon rendering.
    ToggleWireframe,
    /// Switch between the UI cursor and mouse-look.
    ToggleCursorMode,
    /// Close the window.
    Quit,
}

impl Action {
    /// The action bound to `key`, if any. Movement keys are continuous and
    /// have no action.
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::U => Some(Self::ToggleWireframe),
            Key::I => Some(Self::ToggleCursorMode),
            Key::Escape => Some(Self::Quit),
            Key::W | Key::A | Key::S | Key::D => None,
        }
    }
}
