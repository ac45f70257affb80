use sandbox_common::{Direction, MovementInput};

/// Logical keys the sandbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    U,
    I,
    Escape,
}

impl Key {
    pub const COUNT: usize = 7;
    pub const ALL: [Key; Self::COUNT] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::U,
        Key::I,
        Key::Escape,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Movement direction bound to this key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::W => Some(Direction::Forward),
            Key::S => Some(Direction::Backward),
            Key::A => Some(Direction::Left),
            Key::D => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held-key state for the current and previous frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    current: [bool; Key::COUNT],
    previous: [bool; Key::COUNT],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.current[key.index()] = pressed;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.current[key.index()]
    }

    pub fn is_released(&self, key: Key) -> bool {
        !self.is_pressed(key)
    }

    /// Pressed now but not at the end of the previous frame.
    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.current[key.index()] && !self.previous[key.index()]
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        !self.current[key.index()] && self.previous[key.index()]
    }

    /// Roll the current state into the previous one. Call once per frame.
    pub fn advance(&mut self) {
        self.previous = self.current;
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.current = [false; Key::COUNT];
    }

    /// Movement directions currently held.
    pub fn movement(&self) -> MovementInput {
        let mut input = MovementInput::default();
        for key in Key::ALL {
            if let Some(direction) = key.direction() {
                input.set(direction, self.is_pressed(key));
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keys_have_distinct_indices() {
        let mut seen = [false; Key::COUNT];
        for key in Key::ALL {
            assert!(!seen[key.index()]);
            seen[key.index()] = true;
        }
    }

    #[test]
    fn press_and_release_edges() {
        let mut kb = KeyboardState::new();
        kb.set(Key::U, true);
        assert!(kb.is_pressed(Key::U));
        assert!(kb.is_just_pressed(Key::U));

        kb.advance();
        assert!(kb.is_pressed(Key::U));
        assert!(!kb.is_just_pressed(Key::U));

        kb.set(Key::U, false);
        assert!(kb.is_released(Key::U));
        assert!(kb.is_just_released(Key::U));

        kb.advance();
        assert!(!kb.is_just_released(Key::U));
    }

    #[test]
    fn movement_maps_wasd() {
        let mut kb = KeyboardState::new();
        kb.set(Key::W, true);
        kb.set(Key::D, true);
        kb.set(Key::U, true);
        let m = kb.movement();
        assert!(m.forward && m.right);
        assert!(!m.backward && !m.left);
    }

    #[test]
    fn clear_releases_all() {
        let mut kb = KeyboardState::new();
        kb.set(Key::A, true);
        kb.set(Key::Escape, true);
        kb.clear();
        assert!(Key::ALL.iter().all(|k| kb.is_released(*k)));
    }
}
