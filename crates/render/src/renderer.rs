use std::fmt::Write as _;

use glam::{Mat4, Vec3};
use sandbox_camera::Camera;

use crate::scene::Scene;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const ASPECT_MIN: f32 = 0.1;
pub const ASPECT_MAX: f32 = 2.0;

/// Camera-derived matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        let start = sandbox_common::CameraSettings::default().position;
        Self::from_camera(&Camera::at(start), 4.0 / 3.0)
    }
}

impl RenderView {
    /// Snapshot `camera` using its selected look-at strategy and zoom.
    pub fn from_camera(camera: &Camera, aspect: f32) -> Self {
        let fov_degrees = camera.zoom();
        Self {
            view: camera.view_matrix(),
            projection: Mat4::perspective_rh(
                fov_degrees.to_radians(),
                aspect.max(f32::EPSILON),
                Z_NEAR,
                Z_FAR,
            ),
            eye: camera.position,
            fov_degrees,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Per-frame render toggles the overlay edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub aspect_ratio: f32,
    pub wireframe: bool,
    pub clear_color: [f32; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 4.0 / 3.0,
            wireframe: false,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl RenderSettings {
    pub fn from_config(config: &sandbox_common::RenderConfig, width: u32, height: u32) -> Self {
        let mut settings = Self {
            wireframe: config.wireframe,
            clear_color: config.clear_color,
            ..Self::default()
        };
        settings.fit_window(width, height);
        settings
    }

    /// Reset the aspect ratio from a window size. Zero-sized windows
    /// (minimized) leave it unchanged.
    pub fn fit_window(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.set_aspect_ratio(width as f32 / height as f32);
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect_ratio = aspect.clamp(ASPECT_MIN, ASPECT_MAX);
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        self.wireframe
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and view, then produces output. It never
/// touches the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame at `elapsed` seconds.
    fn render(&self, scene: &Scene, view: &RenderView, elapsed: f32) -> Self::Output;
}

/// Produces a human-readable dump of one frame. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView, elapsed: f32) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame (t={elapsed:.2}s, primitive={}) ===",
            scene.primitive.label()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) fov={:.1}",
            view.eye.x, view.eye.y, view.eye.z, view.fov_degrees
        );
        let _ = writeln!(out, "Objects: {}", scene.positions.len());

        let view_projection = view.view_projection();
        for (i, model) in scene.model_matrices(elapsed).iter().enumerate() {
            let world = model.transform_point3(Vec3::ZERO);
            let clip = view_projection * world.extend(1.0);
            let visible = clip.w > 0.0
                && clip.x.abs() <= clip.w
                && clip.y.abs() <= clip.w
                && (0.0..=clip.w).contains(&clip.z);
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.2}, {:.2}, {:.2}) angle={:.1} {}",
                world.x,
                world.y,
                world.z,
                Scene::angle_degrees(i, elapsed),
                if visible { "visible" } else { "culled" }
            );
        }
        out
    }
}
