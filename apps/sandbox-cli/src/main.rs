mod sim;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec3;
use sandbox_camera::Camera;
use sandbox_common::SandboxConfig;
use sandbox_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use tracing_subscriber::EnvFilter;

use crate::sim::Script;

#[derive(Parser)]
#[command(name = "sandbox-cli", version, about = "Headless tools for the rendering sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration summary
    Info,
    /// Print the effective configuration as YAML
    Config {
        /// Only validate, print nothing on success
        #[arg(long)]
        check: bool,
    },
    /// Run the camera headless with scripted input
    Simulate {
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Held movement keys, e.g. "wd"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Horizontal mouse offset per frame
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        look_x: f32,
        /// Vertical mouse offset per frame, positive looks up
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        look_y: f32,
        /// Wheel lines per frame, positive zooms in
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        scroll: f32,
        /// Print a JSON report instead of the frame dump
        #[arg(long)]
        json: bool,
    },
    /// Print both look-at matrices for one pose and their largest difference
    CompareViews {
        #[arg(long, default_value = "-90", allow_negative_numbers = true)]
        yaw: f32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        pitch: f32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: f32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        y: f32,
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        z: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = SandboxConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("sandbox-cli v{}", env!("CARGO_PKG_VERSION"));
            let c = &config.camera;
            println!(
                "window: {}x{} \"{}\"",
                config.window.width, config.window.height, config.window.title
            );
            println!(
                "camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} fov={:.1} speed={:.2}",
                c.position.x, c.position.y, c.position.z, c.yaw, c.pitch, c.zoom, c.movement_speed
            );
            println!(
                "camera modes: fps={} look_at={:?} keys={:?}",
                c.fps_mode, c.look_at, c.direction_policy
            );
            println!(
                "render: primitive={} wireframe={} vsync={}",
                config.render.primitive.label(),
                config.render.wireframe,
                config.render.vsync
            );
            match &config.assets.root {
                Some(root) => println!("assets: {}", root.display()),
                None => println!("assets: <auto>"),
            }
        }
        Commands::Config { check } => {
            config.validate()?;
            if check {
                println!("configuration OK");
            } else {
                print!("{}", config.to_yaml_string()?);
            }
        }
        Commands::Simulate {
            frames,
            dt,
            keys,
            look_x,
            look_y,
            scroll,
            json,
        } => {
            let script = Script {
                frames,
                dt,
                movement: sim::parse_keys(&keys)?,
                look: (look_x, look_y),
                scroll,
            };
            let mut camera = Camera::from_settings(&config.camera);
            let report = sim::simulate(&mut camera, &script);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let aspect = config.window.width as f32 / config.window.height as f32;
                let view = RenderView::from_camera(&camera, aspect);
                let scene = Scene::new(config.render.primitive);
                print!("{}", DebugTextRenderer::new().render(&scene, &view, report.elapsed));
                println!("{}", report.camera);
            }
        }
        Commands::CompareViews { yaw, pitch, x, y, z } => {
            let cmp = sim::compare_views(Vec3::new(x, y, z), yaw, pitch);
            println!("standard look-at:\n{}", sim::format_matrix(&cmp.standard));
            println!("explicit look-at:\n{}", sim::format_matrix(&cmp.explicit));
            println!("max element difference: {:.3e}", cmp.max_difference);
        }
    }

    Ok(())
}
