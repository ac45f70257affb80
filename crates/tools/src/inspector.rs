use sandbox_camera::{Camera, LookAtMode};
use sandbox_common::{ZOOM_MAX, ZOOM_MIN};
use serde::Serialize;

/// Read-only camera queries for the overlay and the CLI.
pub struct CameraInspector;

impl CameraInspector {
    pub fn summary(camera: &Camera) -> CameraSummary {
        CameraSummary {
            position: camera.position.to_array(),
            front: camera.front().to_array(),
            up: camera.up().to_array(),
            right: camera.right().to_array(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            zoom: camera.zoom(),
            movement_speed: camera.movement_speed,
            mouse_sensitivity: camera.mouse_sensitivity,
            fps_mode: camera.fps_mode,
            look_at: camera.look_at,
        }
    }
}

/// Snapshot of camera state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraSummary {
    pub position: [f32; 3],
    pub front: [f32; 3],
    pub up: [f32; 3],
    pub right: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub fps_mode: bool,
    pub look_at: LookAtMode,
}

impl std::fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.position;
        let [fx, fy, fz] = self.front;
        write!(
            f,
            "Camera: pos=({x:.2}, {y:.2}, {z:.2}) front=({fx:.3}, {fy:.3}, {fz:.3}) \
             yaw={:.1} pitch={:.1} fov={:.1} speed={:.2} fps={} look_at={:?}",
            self.yaw, self.pitch, self.zoom, self.movement_speed, self.fps_mode, self.look_at
        )
    }
}

pub const SPEED_RANGE: (f32, f32) = (1.0, 100.0);
pub const SENSITIVITY_RANGE: (f32, f32) = (0.01, 1.0);
pub const ZOOM_RANGE: (f32, f32) = (ZOOM_MIN, ZOOM_MAX);

/// Editable copy of the camera fields the overlay exposes.
///
/// Capture it, let widgets mutate it, then [`apply`](Self::apply) it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub position: [f32; 3],
    pub fps_mode: bool,
    pub explicit_look_at: bool,
}

impl CameraTuning {
    pub fn capture(camera: &Camera) -> Self {
        Self {
            zoom: camera.zoom(),
            movement_speed: camera.movement_speed,
            mouse_sensitivity: camera.mouse_sensitivity,
            position: camera.position.to_array(),
            fps_mode: camera.fps_mode,
            explicit_look_at: camera.look_at == LookAtMode::Explicit,
        }
    }

    /// Write back the values that differ from the camera, clamped to their
    /// ranges. Untouched fields keep whatever the camera already holds, even
    /// outside the widget ranges. Returns whether the camera changed.
    pub fn apply(&self, camera: &mut Camera) -> bool {
        let before = Self::capture(camera);

        if self.zoom != before.zoom {
            camera.set_zoom(self.zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1));
        }
        if self.movement_speed != before.movement_speed {
            camera.movement_speed = self.movement_speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        }
        if self.mouse_sensitivity != before.mouse_sensitivity {
            camera.mouse_sensitivity = self
                .mouse_sensitivity
                .clamp(SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1);
        }
        if self.position != before.position {
            camera.position = self.position.into();
        }
        camera.fps_mode = self.fps_mode;
        camera.look_at = if self.explicit_look_at {
            LookAtMode::Explicit
        } else {
            LookAtMode::Standard
        };

        let changed = Self::capture(camera) != before;
        if changed {
            tracing::debug!("camera tuned: {:?}", Self::capture(camera));
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use sandbox_common::CameraSettings;

    #[test]
    fn summary_of_default_camera() {
        let summary = CameraInspector::summary(&Camera::at(Vec3::new(0.0, 0.0, 3.0)));
        assert_eq!(summary.position, [0.0, 0.0, 3.0]);
        assert_eq!(summary.yaw, -90.0);
        assert_eq!(summary.zoom, 45.0);
        assert!((summary.front[2] + 1.0).abs() < 1e-6);
        let text = summary.to_string();
        assert!(text.contains("pos=(0.00, 0.00, 3.00)"));
        assert!(text.contains("fov=45.0"));
        assert!(text.contains("look_at=Standard"));
    }

    #[test]
    fn tuning_round_trip_is_unchanged() {
        let mut camera = Camera::default();
        let tuning = CameraTuning::capture(&camera);
        assert!(!tuning.apply(&mut camera));
    }

    #[test]
    fn tuning_clamps_on_apply() {
        let mut camera = Camera::default();
        let mut tuning = CameraTuning::capture(&camera);
        tuning.zoom = 120.0;
        tuning.movement_speed = 0.0;
        tuning.mouse_sensitivity = 5.0;
        assert!(tuning.apply(&mut camera));
        assert_eq!(camera.zoom(), ZOOM_MAX);
        assert_eq!(camera.movement_speed, SPEED_RANGE.0);
        assert_eq!(camera.mouse_sensitivity, SENSITIVITY_RANGE.1);
    }

    #[test]
    fn untouched_fields_keep_configured_values() {
        let settings = CameraSettings {
            movement_speed: 0.5,
            mouse_sensitivity: 2.0,
            ..CameraSettings::default()
        };
        let mut camera = Camera::from_settings(&settings);

        assert!(!CameraTuning::capture(&camera).apply(&mut camera));
        assert_eq!(camera.movement_speed, 0.5);
        assert_eq!(camera.mouse_sensitivity, 2.0);

        let mut tuning = CameraTuning::capture(&camera);
        tuning.zoom = 30.0;
        assert!(tuning.apply(&mut camera));
        assert_eq!(camera.zoom(), 30.0);
        assert_eq!(camera.movement_speed, 0.5);
    }

    #[test]
    fn tuning_toggles_modes_and_moves() {
        let mut camera = Camera::default();
        let mut tuning = CameraTuning::capture(&camera);
        tuning.position = [1.0, 2.0, 3.0];
        tuning.fps_mode = true;
        tuning.explicit_look_at = true;
        assert!(tuning.apply(&mut camera));
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(camera.fps_mode);
        assert_eq!(camera.look_at, LookAtMode::Explicit);
    }
}
