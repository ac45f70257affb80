use crate::view;
use glam::{Mat4, Vec3};
use sandbox_common::{
    CameraSettings, Direction, DirectionPolicy, FrameTime, LookAtMode, MovementInput,
    PITCH_LIMIT, PointerEvent, ZOOM_MAX, ZOOM_MIN,
};

pub const YAW_DEFAULT: f32 = -90.0;
pub const PITCH_DEFAULT: f32 = 0.0;
pub const SPEED_DEFAULT: f32 = 2.5;
pub const SENSITIVITY_DEFAULT: f32 = 0.1;
pub const ZOOM_DEFAULT: f32 = ZOOM_MAX;
/// Degrees of zoom per unit of wheel scroll.
pub const ZOOM_SPEED: f32 = 1.0;

/// Input for one frame, applied in order: pointer events, then translation.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame<'a> {
    pub pointer: &'a [PointerEvent],
    pub movement: MovementInput,
    pub time: FrameTime,
}

/// Free-fly camera driven by Euler angles.
///
/// `front`, `right` and `up` are derived from `yaw`/`pitch` and `world_up`
/// and are only reachable through getters, so they stay an orthonormal basis
/// after every orientation change. Angles are in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Keep elevation fixed while translating.
    pub fps_mode: bool,
    pub look_at: LookAtMode,
    pub direction_policy: DirectionPolicy,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, YAW_DEFAULT, PITCH_DEFAULT)
    }
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::ZERO,
            right: Vec3::ZERO,
            world_up,
            yaw,
            pitch,
            zoom: ZOOM_DEFAULT,
            movement_speed: SPEED_DEFAULT,
            mouse_sensitivity: SENSITIVITY_DEFAULT,
            fps_mode: false,
            look_at: LookAtMode::Standard,
            direction_policy: DirectionPolicy::Accumulate,
        };
        camera.update_vectors();
        camera
    }

    /// Camera at `position` with the default orientation, looking down -Z.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::Y, YAW_DEFAULT, PITCH_DEFAULT)
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::new(
            settings.position,
            settings.world_up,
            settings.yaw,
            settings.pitch,
        );
        camera.movement_speed = settings.movement_speed;
        camera.mouse_sensitivity = settings.mouse_sensitivity;
        camera.set_zoom(settings.zoom);
        camera.fps_mode = settings.fps_mode;
        camera.look_at = settings.look_at;
        camera.direction_policy = settings.direction_policy;
        tracing::debug!(
            "camera at ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} look_at={:?}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.yaw,
            camera.pitch,
            camera.look_at
        );
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees, for the projection matrix.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the field of view, clamped to the zoom range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Replace yaw and pitch and re-derive the basis. Pitch is not clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_vectors();
    }

    /// Recompute `front`, `right` and `up` from the Euler angles.
    pub fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    /// World-to-camera matrix using the selected look-at construction.
    pub fn view_matrix(&self) -> Mat4 {
        view::view_matrix(
            self.look_at,
            self.position,
            self.target(),
            self.up,
            self.world_up,
        )
    }

    pub fn on_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        // past the poles the basis flips
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn on_mouse_wheel_scroll(&mut self, direction: f32) {
        self.set_zoom(self.zoom - ZOOM_SPEED * direction);
    }

    /// Translate for one frame from the held direction keys.
    pub fn handle_input(&mut self, movement: MovementInput, time: FrameTime) {
        if movement.is_idle() {
            return;
        }

        let velocity = self.movement_speed * time.delta;
        let elevation = self.position.y;

        let step = match self.direction_policy {
            DirectionPolicy::Accumulate => {
                let mut step = Vec3::ZERO;
                if movement.forward {
                    step += self.front;
                }
                if movement.backward {
                    step -= self.front;
                }
                if movement.left {
                    step -= self.right;
                }
                if movement.right {
                    step += self.right;
                }
                step.normalize_or_zero()
            }
            DirectionPolicy::Exclusive => match movement.last_checked() {
                Some(direction) => self.axis(direction),
                None => Vec3::ZERO,
            },
        };
        self.position += step * velocity;

        if self.fps_mode {
            self.position.y = elevation;
        }
    }

    /// Apply a whole frame of input: look and zoom events first, then
    /// translation with the new orientation.
    pub fn apply_frame(&mut self, frame: &CameraFrame<'_>) {
        for event in frame.pointer {
            match *event {
                PointerEvent::Look { x_offset, y_offset } => {
                    self.on_mouse_movement(x_offset, y_offset, true);
                }
                PointerEvent::Scroll(direction) => self.on_mouse_wheel_scroll(direction),
            }
        }
        self.handle_input(frame.movement, frame.time);
    }

    fn axis(&self, direction: Direction) -> Vec3 {
        match direction {
            Direction::Forward => self.front,
            Direction::Backward => -self.front,
            Direction::Left => -self.right,
            Direction::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::max_element_difference;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up = -front (camera looks down its -z)
        assert!((r.cross(u) + f).length() < 1e-4);
    }

    fn orientation_grid() -> impl Iterator<Item = (f32, f32)> {
        (0..72).flat_map(|y| {
            (-17..=17).map(move |p| (y as f32 * 5.0, p as f32 * 5.2))
        })
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert!((cam.front() - Vec3::NEG_Z).length() < EPS);
        assert!((cam.right() - Vec3::X).length() < EPS);
        assert!((cam.up() - Vec3::Y).length() < EPS);
        assert_eq!(cam.zoom(), 45.0);
        assert_eq!(cam.movement_speed, 2.5);
        assert_eq!(cam.mouse_sensitivity, 0.1);
    }

    #[test]
    fn basis_is_orthonormal_everywhere() {
        let mut cam = Camera::default();
        for (yaw, pitch) in orientation_grid() {
            cam.set_orientation(yaw, pitch);
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn update_vectors_is_idempotent() {
        let mut cam = Camera::at(Vec3::new(1.0, 2.0, 3.0));
        cam.set_orientation(37.0, -12.5);
        let before = (cam.front(), cam.right(), cam.up());
        cam.update_vectors();
        assert_eq!(before, (cam.front(), cam.right(), cam.up()));
    }

    #[test]
    fn pitch_is_clamped_when_constrained() {
        let mut cam = Camera::default();
        for _ in 0..100 {
            cam.on_mouse_movement(0.0, 50.0, true);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        for _ in 0..100 {
            cam.on_mouse_movement(3.0, -50.0, true);
            assert!(cam.pitch() >= -PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_can_exceed_bound_when_unconstrained() {
        let mut cam = Camera::default();
        for _ in 0..20 {
            cam.on_mouse_movement(0.0, 100.0, false);
        }
        assert!(cam.pitch() > PITCH_LIMIT);
    }

    #[test]
    fn mouse_movement_scales_by_sensitivity() {
        let mut cam = Camera::default();
        cam.mouse_sensitivity = 0.5;
        cam.on_mouse_movement(10.0, 4.0, true);
        assert!((cam.yaw() - (YAW_DEFAULT + 5.0)).abs() < EPS);
        assert!((cam.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut cam = Camera::default();
        let script = [3.0, 10.0, 50.0, -2.0, -100.0, 0.5, 7.0, -0.25, 60.0, -60.0];
        for step in script {
            cam.on_mouse_wheel_scroll(step);
            assert!((ZOOM_MIN..=ZOOM_MAX).contains(&cam.zoom()));
        }
        cam.on_mouse_wheel_scroll(1000.0);
        assert_eq!(cam.zoom(), ZOOM_MIN);
        cam.on_mouse_wheel_scroll(-1000.0);
        assert_eq!(cam.zoom(), ZOOM_MAX);
    }

    #[test]
    fn scroll_up_zooms_in() {
        let mut cam = Camera::default();
        cam.on_mouse_wheel_scroll(2.0);
        assert_eq!(cam.zoom(), 43.0);
    }

    #[test]
    fn look_at_strategies_agree() {
        let mut cam = Camera::at(Vec3::new(2.5, -1.0, 4.0));
        let grid = (0..36).flat_map(|y| (-16..=16).map(move |p| (y as f32 * 10.0, p as f32 * 5.0)));
        for (yaw, pitch) in grid {
            cam.set_orientation(yaw, pitch);
            cam.look_at = LookAtMode::Standard;
            let standard = cam.view_matrix();
            cam.look_at = LookAtMode::Explicit;
            let explicit = cam.view_matrix();
            let diff = max_element_difference(&standard, &explicit);
            assert!(diff < 1e-4, "yaw={yaw} pitch={pitch} diff={diff}");
        }
    }

    #[test]
    fn forward_moves_by_speed_times_front() {
        let mut cam = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        cam.set_orientation(30.0, 20.0);
        let start = cam.position;
        cam.handle_input(MovementInput::only(Direction::Forward), FrameTime::from_delta(1.0));
        let moved = cam.position - start;
        assert!((moved - 2.5 * cam.front()).length() < EPS);
    }

    #[test]
    fn each_direction_uses_its_axis() {
        let time = FrameTime::from_delta(0.5);
        let cases = [
            (Direction::Forward, 1.0, true),
            (Direction::Backward, -1.0, true),
            (Direction::Left, -1.0, false),
            (Direction::Right, 1.0, false),
        ];
        for (direction, sign, along_front) in cases {
            let mut cam = Camera::default();
            cam.set_orientation(10.0, -5.0);
            let axis = if along_front { cam.front() } else { cam.right() };
            cam.handle_input(MovementInput::only(direction), time);
            let expected = axis * sign * SPEED_DEFAULT * 0.5;
            assert!((cam.position - expected).length() < EPS, "{direction:?}");
        }
    }

    #[test]
    fn idle_input_does_not_move() {
        let mut cam = Camera::at(Vec3::new(1.0, 1.0, 1.0));
        cam.handle_input(MovementInput::default(), FrameTime::from_delta(1.0));
        assert_eq!(cam.position, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn accumulate_combines_directions() {
        let mut cam = Camera::default();
        let input = MovementInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        cam.handle_input(input, FrameTime::from_delta(1.0));
        let expected = (cam.front() + cam.right()).normalize() * SPEED_DEFAULT;
        assert!((cam.position - expected).length() < EPS);
        // diagonals move no faster than a single key
        assert!((cam.position.length() - SPEED_DEFAULT).abs() < EPS);
    }

    #[test]
    fn accumulate_opposites_cancel() {
        let mut cam = Camera::default();
        let input = MovementInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        cam.handle_input(input, FrameTime::from_delta(1.0));
        assert!(cam.position.length() < EPS);
    }

    #[test]
    fn exclusive_last_checked_direction_wins() {
        let mut cam = Camera::default();
        cam.direction_policy = DirectionPolicy::Exclusive;
        let input = MovementInput {
            forward: true,
            left: true,
            ..Default::default()
        };
        cam.handle_input(input, FrameTime::from_delta(1.0));
        let expected = -cam.right() * SPEED_DEFAULT;
        assert!((cam.position - expected).length() < EPS);
    }

    #[test]
    fn fps_mode_keeps_elevation_exactly() {
        let mut cam = Camera::at(Vec3::new(0.0, 1.75, 3.0));
        cam.fps_mode = true;
        let y0 = cam.position.y;

        let directions = [
            Direction::Forward,
            Direction::Left,
            Direction::Backward,
            Direction::Right,
        ];
        for i in 0..200 {
            cam.on_mouse_movement(7.0, if i % 2 == 0 { 13.0 } else { -9.0 }, true);
            let mut input = MovementInput::only(directions[i % 4]);
            input.forward |= i % 3 == 0;
            cam.handle_input(input, FrameTime::from_delta(0.016 * (1 + i % 5) as f32));
            assert_eq!(cam.position.y, y0);
        }
        assert!(cam.position.x != 0.0 || cam.position.z != 3.0);
    }

    #[test]
    fn free_mode_changes_elevation_when_pitched() {
        let mut cam = Camera::default();
        cam.set_orientation(-90.0, 45.0);
        cam.handle_input(MovementInput::only(Direction::Forward), FrameTime::from_delta(1.0));
        assert!(cam.position.y > 0.0);
    }

    #[test]
    fn apply_frame_orders_look_before_move() {
        let mut cam = Camera::default();
        cam.mouse_sensitivity = 1.0;
        let pointer = [
            PointerEvent::Look {
                x_offset: 90.0,
                y_offset: 0.0,
            },
            PointerEvent::Scroll(5.0),
        ];
        cam.apply_frame(&CameraFrame {
            pointer: &pointer,
            movement: MovementInput::only(Direction::Forward),
            time: FrameTime::from_delta(1.0),
        });
        // yaw -90 + 90 = 0 => front is +X
        assert!((cam.front() - Vec3::X).length() < EPS);
        assert!((cam.position - Vec3::X * SPEED_DEFAULT).length() < EPS);
        assert_eq!(cam.zoom(), 40.0);
    }

    #[test]
    fn apply_frame_constrains_pitch() {
        let mut cam = Camera::default();
        let pointer = [PointerEvent::Look {
            x_offset: 0.0,
            y_offset: 10_000.0,
        }];
        cam.apply_frame(&CameraFrame {
            pointer: &pointer,
            movement: MovementInput::default(),
            time: FrameTime::default(),
        });
        assert_eq!(cam.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn from_settings_copies_everything() {
        let settings = CameraSettings {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.0,
            pitch: 10.0,
            movement_speed: 4.0,
            mouse_sensitivity: 0.2,
            zoom: 30.0,
            fps_mode: true,
            look_at: LookAtMode::Explicit,
            direction_policy: DirectionPolicy::Exclusive,
            ..CameraSettings::default()
        };
        let cam = Camera::from_settings(&settings);
        assert_eq!(cam.position, settings.position);
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 10.0);
        assert_eq!(cam.movement_speed, 4.0);
        assert_eq!(cam.mouse_sensitivity, 0.2);
        assert_eq!(cam.zoom(), 30.0);
        assert!(cam.fps_mode);
        assert_eq!(cam.look_at, LookAtMode::Explicit);
        assert_eq!(cam.direction_policy, DirectionPolicy::Exclusive);
        assert_orthonormal(&cam);
    }

    #[test]
    fn view_matrix_maps_target_forward() {
        let cam = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -3.0)).length() < EPS);
    }
}
