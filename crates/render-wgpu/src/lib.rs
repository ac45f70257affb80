//! wgpu render backend for the sandbox.
//!
//! Draws the scene's primitive once per object with two blended textures,
//! a depth buffer and an optional line-mode pipeline for wireframe.
//!
//! # Invariants
//! - The renderer reads a [`sandbox_render::RenderView`] and never touches
//!   the camera.
//! - A failed shader reload leaves the previous pipelines in place.

mod gpu;
pub mod shaders;
pub mod texture;

pub use gpu::{DEPTH_FORMAT, WgpuRenderer, optional_features};

/// Errors from the GPU backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error(transparent)]
    Asset(#[from] sandbox_assets::AssetError),
}
