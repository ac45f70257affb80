//! Free-fly camera for the rendering sandbox.
//!
//! The camera owns yaw/pitch and derives an orthonormal front/right/up basis
//! from them. Each frame it receives an explicit [`CameraFrame`] (pointer
//! events, held movement keys, frame time) and exposes a view matrix and
//! field of view to the renderer.
//!
//! # Invariants
//! - `front`, `right`, `up` are unit length and mutually orthogonal after
//!   every orientation change.
//! - Pitch stays within ±89° when constrained; zoom stays within [1°, 45°].
//! - In FPS mode translation never changes the Y coordinate.
//! - Both look-at constructions produce the same view matrix up to rounding.

mod camera;
pub mod view;

pub use camera::{
    Camera, CameraFrame, PITCH_DEFAULT, SENSITIVITY_DEFAULT, SPEED_DEFAULT, YAW_DEFAULT,
    ZOOM_DEFAULT, ZOOM_SPEED,
};
pub use sandbox_common::{DirectionPolicy, LookAtMode};
