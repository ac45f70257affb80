use glam::{Mat4, Vec3, Vec4};
use sandbox_common::LookAtMode;

/// Build a world-to-camera matrix looking from `eye` at `target`.
///
/// `Standard` uses glam's right-handed look-at with `up`. `Explicit` derives
/// the camera axes by hand from `world_up` and composes rotation * translation.
/// The two agree up to float rounding whenever `up` lies in the plane spanned
/// by `world_up` and the viewing direction, which is always the case for
/// the basis produced by [`crate::Camera`].
pub fn view_matrix(mode: LookAtMode, eye: Vec3, target: Vec3, up: Vec3, world_up: Vec3) -> Mat4 {
    match mode {
        LookAtMode::Standard => Mat4::look_at_rh(eye, target, up),
        LookAtMode::Explicit => look_at_explicit(eye, target, world_up),
    }
}

/// Hand-derived look-at.
///
/// Camera space has `z` pointing from the target back to the eye, `x` to the
/// right and `y` up. The rotation takes those axes as its rows; translation
/// by `-eye` is applied first.
pub fn look_at_explicit(eye: Vec3, target: Vec3, world_up: Vec3) -> Mat4 {
    let z_axis = (eye - target).normalize();
    let x_axis = world_up.normalize().cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    // glam is column-major: column j holds the j-th component of each row.
    let rotation = Mat4::from_cols(
        Vec4::new(x_axis.x, y_axis.x, z_axis.x, 0.0),
        Vec4::new(x_axis.y, y_axis.y, z_axis.y, 0.0),
        Vec4::new(x_axis.z, y_axis.z, z_axis.z, 0.0),
        Vec4::W,
    );
    let translation = Mat4::from_translation(-eye);

    rotation * translation
}

/// Largest absolute element-wise difference between two matrices.
pub fn max_element_difference(a: &Mat4, b: &Mat4) -> f32 {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_matches_glam_on_axis() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let target = Vec3::ZERO;
        let a = view_matrix(LookAtMode::Standard, eye, target, Vec3::Y, Vec3::Y);
        let b = view_matrix(LookAtMode::Explicit, eye, target, Vec3::Y, Vec3::Y);
        assert!(max_element_difference(&a, &b) < 1e-6);
    }

    #[test]
    fn explicit_moves_eye_to_origin() {
        let eye = Vec3::new(4.0, -2.0, 7.5);
        let view = look_at_explicit(eye, Vec3::new(1.0, 1.0, 1.0), Vec3::Y);
        let p = view.transform_point3(eye);
        assert!(p.length() < 1e-5);
    }

    #[test]
    fn target_lies_on_negative_z() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(-3.0, 0.5, -2.0);
        let view = look_at_explicit(eye, target, Vec3::Y);
        let p = view.transform_point3(target);
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z + (target - eye).length()).abs() < 1e-4);
    }

    #[test]
    fn unnormalized_world_up_is_accepted() {
        let eye = Vec3::new(0.0, 1.0, 5.0);
        let a = look_at_explicit(eye, Vec3::ZERO, Vec3::Y);
        let b = look_at_explicit(eye, Vec3::ZERO, Vec3::new(0.0, 7.0, 0.0));
        assert!(max_element_difference(&a, &b) < 1e-6);
    }

    #[test]
    fn max_difference_of_identical_is_zero() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(max_element_difference(&m, &m), 0.0);
        assert_eq!(max_element_difference(&m, &Mat4::IDENTITY), 3.0);
    }
}
