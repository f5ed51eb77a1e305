//! A simple perspective camera for 3D scenes.

use glam::{Mat4, Vec3};

/// Camera state: position, orientation, and projection parameters.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Direction the camera looks along (need not be normalized).
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for Camera {
    /// The scene's opening view: above and in front of the desk, angled
    /// slightly downward.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 12.0),
            forward: Vec3::new(0.0, -0.5, -2.0).normalize(),
            up: Vec3::Y,
            fov: 80.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-camera matrix (right-handed look-along).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    /// Camera-to-clip perspective matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let camera = Camera::default();
        let p = camera.view_matrix() * camera.position.extend(1.0);
        assert!(p.abs_diff_eq(Vec4::new(0.0, 0.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn view_matrix_points_forward_down_negative_z() {
        let camera = Camera::default();
        let ahead = camera.position + camera.forward;
        let p = camera.view_matrix() * ahead.extend(1.0);
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn projection_maps_near_plane_to_zero_depth() {
        let camera = Camera::default();
        let proj = camera.projection_matrix(1.25);
        let p = proj * Vec4::new(0.0, 0.0, -camera.near, 1.0);
        assert!((p.z / p.w).abs() < 1e-5);
    }
}
