//! Renderer-agnostic frame description.
//!
//! # Invariants
//! - Renderers read the camera through a [`RenderView`] snapshot and never
//!   mutate it.
//! - Scene geometry and object transforms are pure functions of the
//!   primitive kind and elapsed time.
//!
//! The GPU backend lives in `sandbox-render-wgpu`; [`DebugTextRenderer`]
//! implements the same trait for headless use.

mod renderer;
mod scene;

pub use renderer::{
    ASPECT_MAX, ASPECT_MIN, DebugTextRenderer, RenderSettings, RenderView, Renderer, Z_FAR, Z_NEAR,
};
pub use scene::{
    MeshData, MeshVertex, OBJECT_POSITIONS, SPIN_DEGREES_PER_SECOND, Scene, TILT_STEP_DEGREES,
};
