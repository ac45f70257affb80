mod app;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sandbox_assets::AssetFs;
use sandbox_common::{LookAtMode, PrimitiveKind, SandboxConfig};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::SandboxApp;

#[derive(Parser)]
#[command(name = "sandbox-desktop", version, about = "Rendering sandbox with a free-fly camera")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Content root holding shaders/ and textures/
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Keep the camera at a fixed height while moving
    #[arg(long)]
    fps_mode: bool,

    /// Build the view matrix by hand instead of glam's look-at
    #[arg(long)]
    custom_lookat: bool,

    /// Primitive drawn at every scene slot (triangle, plane, cube)
    #[arg(long)]
    primitive: Option<PrimitiveKind>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    fn apply(&self, config: &mut SandboxConfig) {
        if self.fps_mode {
            config.camera.fps_mode = true;
        }
        if self.custom_lookat {
            config.camera.look_at = LookAtMode::Explicit;
        }
        if let Some(primitive) = self.primitive {
            config.render.primitive = primitive;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(root) = &self.assets {
            config.assets.root = Some(root.clone());
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose || cfg!(debug_assertions) {
        "debug,wgpu_core=warn,wgpu_hal=warn,naga=warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SandboxConfig::load_or_default(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    tracing::info!("sandbox-desktop starting");
    match &cli.config {
        Some(path) => tracing::info!("configuration: {}", path.display()),
        None => tracing::info!("configuration: built-in defaults"),
    }
    let assets = AssetFs::discover(config.assets.root.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SandboxApp::new(config, assets);
    event_loop.run_app(&mut app)?;

    if let Some(error) = app.take_error() {
        return Err(error);
    }
    tracing::info!("sandbox-desktop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "sandbox-desktop",
            "--fps-mode",
            "--custom-lookat",
            "--primitive",
            "plane",
            "--width",
            "640",
        ]);
        let mut config = SandboxConfig::default();
        cli.apply(&mut config);
        assert!(config.camera.fps_mode);
        assert_eq!(config.camera.look_at, LookAtMode::Explicit);
        assert_eq!(config.render.primitive, PrimitiveKind::Plane);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn rejects_unknown_primitive() {
        assert!(Cli::try_parse_from(["sandbox-desktop", "--primitive", "sphere"]).is_err());
    }
}
