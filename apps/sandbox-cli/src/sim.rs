use anyhow::{Result, bail};
use glam::{Mat4, Vec3};
use sandbox_camera::view::{max_element_difference, view_matrix};
use sandbox_camera::{Camera, CameraFrame};
use sandbox_common::{Direction, FrameTime, LookAtMode, MovementInput, PointerEvent};
use sandbox_tools::{CameraInspector, CameraSummary};
use serde::Serialize;

/// Scripted input replayed identically on every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub frames: u32,
    pub dt: f32,
    pub movement: MovementInput,
    pub look: (f32, f32),
    pub scroll: f32,
}

/// Parse held keys from a string such as `"wd"`.
pub fn parse_keys(keys: &str) -> Result<MovementInput> {
    let mut movement = MovementInput::default();
    for c in keys.chars() {
        let direction = match c.to_ascii_lowercase() {
            'w' => Direction::Forward,
            's' => Direction::Backward,
            'a' => Direction::Left,
            'd' => Direction::Right,
            other => bail!("unknown movement key '{other}', expected any of w, a, s, d"),
        };
        movement.set(direction, true);
    }
    Ok(movement)
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub frames: u32,
    pub elapsed: f32,
    pub camera: CameraSummary,
}

/// Drive `camera` through `script`, one [`CameraFrame`] per frame.
pub fn simulate(camera: &mut Camera, script: &Script) -> SimulationReport {
    let mut pointer = Vec::new();
    let (x_offset, y_offset) = script.look;
    if x_offset != 0.0 || y_offset != 0.0 {
        pointer.push(PointerEvent::Look { x_offset, y_offset });
    }
    if script.scroll != 0.0 {
        pointer.push(PointerEvent::Scroll(script.scroll));
    }

    let mut elapsed = 0.0;
    for frame in 0..script.frames {
        elapsed += script.dt;
        camera.apply_frame(&CameraFrame {
            pointer: &pointer,
            movement: script.movement,
            time: FrameTime::new(script.dt, elapsed),
        });
        tracing::trace!("frame {frame}: position {}", camera.position);
    }
    tracing::debug!("simulated {} frames", script.frames);

    SimulationReport {
        frames: script.frames,
        elapsed,
        camera: CameraInspector::summary(camera),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ViewComparison {
    pub standard: Mat4,
    pub explicit: Mat4,
    pub max_difference: f32,
}

/// Build both look-at matrices for one camera pose.
pub fn compare_views(position: Vec3, yaw: f32, pitch: f32) -> ViewComparison {
    let camera = Camera::new(position, Vec3::Y, yaw, pitch);
    let target = camera.target();
    let standard = view_matrix(
        LookAtMode::Standard,
        camera.position,
        target,
        camera.up(),
        camera.world_up(),
    );
    let explicit = view_matrix(
        LookAtMode::Explicit,
        camera.position,
        target,
        camera.up(),
        camera.world_up(),
    );
    ViewComparison {
        standard,
        explicit,
        max_difference: max_element_difference(&standard, &explicit),
    }
}

/// Row-major text rendering of a matrix, one row per line.
pub fn format_matrix(m: &Mat4) -> String {
    (0..4)
        .map(|i| {
            let r = m.row(i);
            format!("[{:>9.5} {:>9.5} {:>9.5} {:>9.5}]", r.x, r.y, r.z, r.w)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys() {
        let m = parse_keys("Wd").unwrap();
        assert!(m.forward && m.right && !m.left && !m.backward);
        assert!(parse_keys("").unwrap().is_idle());
        assert!(parse_keys("wq").is_err());
    }

    #[test]
    fn forward_for_one_second() {
        let mut camera = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        let script = Script {
            frames: 10,
            dt: 0.1,
            movement: parse_keys("w").unwrap(),
            look: (0.0, 0.0),
            scroll: 0.0,
        };
        let report = simulate(&mut camera, &script);
        assert_eq!(report.frames, 10);
        assert!((report.elapsed - 1.0).abs() < 1e-5);
        // 2.5 units per second along -Z
        assert!((camera.position.z - 0.5).abs() < 1e-4);
        assert!((report.camera.position[2] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn look_and_scroll_accumulate() {
        let mut camera = Camera::default();
        let script = Script {
            frames: 5,
            dt: 0.016,
            movement: MovementInput::default(),
            look: (10.0, 1000.0),
            scroll: 2.0,
        };
        simulate(&mut camera, &script);
        assert!((camera.yaw() - -85.0).abs() < 1e-3);
        assert_eq!(camera.pitch(), 89.0);
        assert_eq!(camera.zoom(), 35.0);
    }

    #[test]
    fn report_serializes() {
        let mut camera = Camera::default();
        let script = Script {
            frames: 1,
            dt: 0.1,
            movement: MovementInput::default(),
            look: (0.0, 0.0),
            scroll: 0.0,
        };
        let json = serde_json::to_value(simulate(&mut camera, &script)).unwrap();
        assert_eq!(json["frames"], 1);
        assert_eq!(json["camera"]["look_at"], "standard");
    }

    #[test]
    fn views_agree() {
        let cmp = compare_views(Vec3::new(1.0, 2.0, 3.0), 30.0, -20.0);
        assert!(cmp.max_difference < 1e-4);
    }

    #[test]
    fn identity_formats_rows() {
        let text = format_matrix(&Mat4::IDENTITY);
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("[  1.00000   0.00000"));
    }
}
