//! Damped orbit camera.
//!
//! Input moves a target orientation; [`OrbitCamera::update`] eases the
//! current orientation toward it a fixed fraction per frame, so the view
//! keeps gliding briefly after the mouse stops.

use glam::{Mat4, Vec3};

use crate::render_loop::CameraControls;

const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;

/// Orbit camera looking at a fixed target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    /// Fraction of the remaining motion applied per update.
    pub damping: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Camera at (3, 3, 3) looking at the origin.
    pub fn new() -> Self {
        Self::looking_from(Vec3::splat(3.0))
    }

    /// Camera at `eye` looking at the origin.
    pub fn looking_from(eye: Vec3) -> Self {
        let distance = eye.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = (eye.y / eye.length().max(f32::EPSILON))
            .asin()
            .clamp(MIN_PITCH, MAX_PITCH);
        let yaw = eye.x.atan2(eye.z);
        Self {
            yaw,
            pitch,
            distance,
            target: Vec3::ZERO,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
            damping: 0.05,
            fov_y: 75.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Follow a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by a mouse drag of `dx`, `dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.target_yaw -= dx * 0.005;
        self.target_pitch = (self.target_pitch + dy * 0.005).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Zoom by scroll wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.target_distance = (self.target_distance * (1.0 - lines * 0.1))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControls for OrbitCamera {
    fn update(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * self.damping;
        self.pitch += (self.target_pitch - self.pitch) * self.damping;
        self.distance += (self.target_distance - self.distance) * self.damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let camera = OrbitCamera::new();
        let p = camera.position();
        assert!((p - Vec3::splat(3.0)).length() < 1e-4, "{p:?}");
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut camera = OrbitCamera::new();
        let start = camera.yaw;
        camera.rotate(-100.0, 0.0);

        camera.update();
        let after_one = camera.yaw - start;
        assert!(after_one > 0.0 && after_one < 0.5 * 0.1);

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.yaw - (start + 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_and_zoom_clamped() {
        let mut camera = OrbitCamera::new();
        camera.rotate(0.0, 10_000.0);
        camera.zoom(100.0);
        for _ in 0..1_000 {
            camera.update();
        }
        assert!(camera.pitch <= MAX_PITCH + 1e-4);
        assert!(camera.distance >= MIN_DISTANCE - 1e-4);
    }

    #[test]
    fn test_viewport_sets_aspect() {
        let mut camera = OrbitCamera::new();
        camera.set_viewport(1600, 800);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(0, 800);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = OrbitCamera::new();
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }
}
