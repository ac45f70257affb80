//! Content access: a read-only virtual filesystem over mounted directories
//! and texture decoding.
//!
//! # Layout
//! A content root holds `shaders/` and `textures/`. Consumers address files
//! through [`AssetPath`], never through host paths.

mod fs;
mod texture;

use std::path::PathBuf;

pub use fs::{AssetFs, AssetKind, AssetPath};
pub use texture::TextureImage;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("invalid asset path '{0}'")]
    InvalidPath(String),
    #[error("cannot mount '{}': not a directory", .0.display())]
    MountMissing(PathBuf),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
}
