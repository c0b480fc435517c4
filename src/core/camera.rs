//! Camera pose and projection helpers

use crate::core::types::{Vec3, Mat3, Mat4, Quat};

/// Camera placement in world space, supplied by the scene every frame.
///
/// Compared with exact equality by the view change check: the caller
/// already quantizes the pose per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
}

impl CameraPose {
    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));

        Self { position, rotation }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Projection matrix (camera to clip space) for a horizontal field of view.
///
/// The engine reports fov horizontally in degrees; the vertical angle is
/// derived from the aspect ratio.
pub fn projection_matrix(fov_x_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let half_x = (fov_x_degrees * 0.5).to_radians();
    let fov_y = 2.0 * (half_x.tan() / aspect).atan();
    Mat4::perspective_rh(fov_y, aspect, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let forward = CameraPose::default().forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let pose = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);

        let view = pose.view_matrix();
        // World origin lands at (-10, 0, 0) in camera space
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_look_at_points_forward() {
        let pose = CameraPose::look_at(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::Y);
        assert!((pose.forward() - Vec3::X).length() < 0.001);

        // Target ends up straight ahead on the -Z axis in view space
        let target = pose.view_matrix().transform_point3(Vec3::new(5.0, 0.0, 0.0));
        assert!(target.x.abs() < 0.001);
        assert!((target.z - (-5.0)).abs() < 0.001);
    }

    #[test]
    fn test_projection_horizontal_fov() {
        // 90 degrees horizontal: a point at 45 degrees to the side hits the
        // right edge of clip space
        let proj = projection_matrix(90.0, 16.0 / 9.0, 1.0, 100.0);
        let clip = proj * glam::Vec4::new(10.0, 0.0, -10.0, 1.0);
        assert!((clip.x / clip.w - 1.0).abs() < 0.001);
    }
}
