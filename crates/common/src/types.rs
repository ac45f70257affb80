use serde::{Deserialize, Serialize};

/// Time context for one rendered frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds elapsed since the previous frame.
    pub delta: f32,
    /// Seconds elapsed since the clock started.
    pub elapsed: f32,
}

impl FrameTime {
    pub fn new(delta: f32, elapsed: f32) -> Self {
        Self { delta, elapsed }
    }

    /// A frame of `delta` seconds with no elapsed history (tests, scripted runs).
    pub fn from_delta(delta: f32) -> Self {
        Self {
            delta,
            elapsed: delta,
        }
    }
}

/// One of the four planar movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Which directional keys are held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// Input with exactly one direction held.
    pub fn only(direction: Direction) -> Self {
        let mut input = Self::default();
        input.set(direction, true);
        input
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Backward => self.backward = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    /// The single direction chosen when keys are checked in the order
    /// forward, backward, left, right and the last held one wins.
    pub fn last_checked(&self) -> Option<Direction> {
        [
            Direction::Forward,
            Direction::Backward,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .rev()
        .find(|d| self.is_held(*d))
    }
}

/// A discrete pointer event routed to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Mouse moved while looking. Positive `y_offset` looks up.
    Look { x_offset: f32, y_offset: f32 },
    /// Wheel scrolled. Positive values scroll away from the user.
    Scroll(f32),
}
