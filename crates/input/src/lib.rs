//! Input handling: raw events in, explicit per-frame messages out.
//!
//! # Invariants
//! - The windowing layer only pushes [`InputEvent`]s; nothing here depends
//!   on winit.
//! - Camera-bound input (mouse look, scroll, movement keys) is only produced
//!   while the cursor is in [`CursorMode::Look`].
//! - Discrete commands are reported as [`Action`]s, once per key press.

pub mod action;
mod collector;
mod key;

pub use action::Action;
pub use collector::{CursorMode, InputCollector, InputEvent, WindowSignal};
pub use key::{Key, KeyboardState};
