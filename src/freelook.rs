//! First-person freelook controller for walking around the desk.
//!
//! Mouse movement steers yaw and pitch; W/S move along the view direction,
//! A/D strafe, and Q/E move straight up and down in world space. Two preset
//! keys snap the camera to fixed viewpoints:
//!
//! - **O** — position (0, 4, 10), looking level along -Z
//! - **P** — position (0, 5.5, 8), angled down at the desk with a wide
//!   110° field of view

use glam::Vec3;
use winit::keyboard::KeyCode;

use crate::camera::Camera;
use crate::input::Input;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// A first-person camera controller.
#[derive(Clone, Debug)]
pub struct FreelookCamera {
    /// Current camera position.
    pub position: Vec3,
    /// Horizontal angle in radians (yaw). 0 = looking toward -Z.
    pub yaw: f32,
    /// Vertical angle in radians (pitch). 0 = horizontal, positive = up.
    pub pitch: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Mouse sensitivity for looking.
    pub sensitivity: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for FreelookCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_2,
            sensitivity: 0.002,
            speed: 4.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl FreelookCamera {
    /// Create a new freelook camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the camera position.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the field of view in degrees.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Set the initial look direction from a direction vector.
    pub fn looking_toward(mut self, direction: Vec3) -> Self {
        self.look_toward(direction);
        self
    }

    /// Set mouse sensitivity.
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set movement speed.
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set near and far clipping planes.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Point the camera along a direction, converting it to yaw/pitch.
    pub fn look_toward(&mut self, direction: Vec3) {
        let dir = direction.normalize_or_zero();
        self.yaw = dir.x.atan2(-dir.z);
        self.pitch = dir.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Compute the forward direction vector from current yaw and pitch.
    fn forward_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize_or_zero()
    }

    /// Compute the right direction vector (for strafing).
    fn right_direction(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalize_or_zero()
    }

    /// Update the camera from input and delta time.
    pub fn update(&mut self, input: &Input, dt: f32) {
        // Preset viewpoints.
        if input.key_pressed(KeyCode::KeyO) {
            self.position = Vec3::new(0.0, 4.0, 10.0);
            self.look_toward(Vec3::NEG_Z);
        }
        if input.key_pressed(KeyCode::KeyP) {
            self.position = Vec3::new(0.0, 5.5, 8.0);
            self.look_toward(Vec3::new(0.0, -0.5, -2.0));
            self.fov = 110.0_f32.to_radians();
        }

        // Mouse look, with pitch clamped short of straight up/down.
        let delta = input.mouse_delta();
        self.yaw += delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Movement. W/S follow the full view direction (including pitch);
        // Q/E move vertically in world space.
        let forward = self.forward_direction();
        let right = self.right_direction();

        let mut velocity = Vec3::ZERO;
        if input.key_down(KeyCode::KeyW) {
            velocity += forward;
        }
        if input.key_down(KeyCode::KeyS) {
            velocity -= forward;
        }
        if input.key_down(KeyCode::KeyA) {
            velocity -= right;
        }
        if input.key_down(KeyCode::KeyD) {
            velocity += right;
        }
        if input.key_down(KeyCode::KeyQ) {
            velocity += Vec3::Y;
        }
        if input.key_down(KeyCode::KeyE) {
            velocity -= Vec3::Y;
        }

        if velocity.length_squared() > 0.0 {
            self.position += velocity.normalize() * self.speed * dt;
        }
    }

    /// Snapshot the current state as a [`Camera`].
    pub fn camera(&self) -> Camera {
        Camera {
            position: self.position,
            forward: self.forward_direction(),
            up: Vec3::Y,
            fov: self.fov,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn desk_camera() -> FreelookCamera {
        FreelookCamera::new()
            .position(Vec3::new(0.0, 5.0, 12.0))
            .looking_toward(Vec3::new(0.0, -0.5, -2.0))
            .fov(80.0)
    }

    #[test]
    fn looking_toward_recovers_direction() {
        let cam = desk_camera();
        let expected = Vec3::new(0.0, -0.5, -2.0).normalize();
        assert!(cam.camera().forward.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn pitch_stays_clamped_under_extreme_mouse_motion() {
        let mut cam = desk_camera();
        let mut input = Input::new();
        input.move_mouse(Vec2::new(0.0, -100000.0));

        cam.update(&input, 0.016);
        assert!(cam.pitch <= PITCH_LIMIT);
        assert!(cam.camera().forward.y < 1.0);
    }

    #[test]
    fn w_moves_along_view_direction() {
        let mut cam = desk_camera();
        let start = cam.position;
        let forward = cam.camera().forward;

        let mut input = Input::new();
        input.press(KeyCode::KeyW);
        cam.update(&input, 1.0);

        let moved = cam.position - start;
        assert!((moved.length() - cam.speed).abs() < 1e-4);
        assert!(moved.normalize().abs_diff_eq(forward, 1e-5));
    }

    #[test]
    fn q_and_e_move_vertically() {
        let mut cam = desk_camera();
        let mut input = Input::new();
        input.press(KeyCode::KeyQ);
        cam.update(&input, 0.5);
        assert!(cam.position.y > 5.0);
        assert_eq!(cam.position.x, 0.0);

        let mut cam = desk_camera();
        let mut input = Input::new();
        input.press(KeyCode::KeyE);
        cam.update(&input, 0.5);
        assert!(cam.position.y < 5.0);
    }

    #[test]
    fn preset_o_snaps_to_front_view() {
        let mut cam = desk_camera();
        let mut input = Input::new();
        input.press(KeyCode::KeyO);
        cam.update(&input, 0.016);

        assert_eq!(cam.position, Vec3::new(0.0, 4.0, 10.0));
        assert!(cam.camera().forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        // O leaves the field of view alone.
        assert!((cam.fov - 80.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn preset_p_widens_field_of_view() {
        let mut cam = desk_camera();
        let mut input = Input::new();
        input.press(KeyCode::KeyP);
        cam.update(&input, 0.016);

        assert_eq!(cam.position, Vec3::new(0.0, 5.5, 8.0));
        assert!((cam.fov - 110.0_f32.to_radians()).abs() < 1e-6);
    }
}
