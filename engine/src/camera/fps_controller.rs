//! FPS Camera Module
//!
//! First-person camera: mouse movement directly rotates the view, and the
//! position is owned by whoever drives it (in a running session, the
//! player body plus an eye offset, rewritten every tick).
//!
//! Key features:
//! - Direct mouse input → camera rotation (no button required)
//! - Configurable sensitivity (default: 0.002 rad/pixel)
//! - Pitch clamped to ±89 degrees to prevent gimbal lock
//! - Perspective projection with aspect driven by resize events

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// First-person camera pose plus projection parameters.
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = FpsCamera::new();
///
/// // In your input loop, pass raw mouse delta (in pixels)
/// camera.apply_mouse_delta(mouse_dx, mouse_dy);
///
/// // On window resize
/// camera.set_aspect(width, height);
///
/// let view_proj = camera.view_projection();
/// ```
#[derive(Clone, Debug)]
pub struct FpsCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Horizontal angle (radians) - unrestricted, wraps around
    pub yaw: f32,
    /// Vertical angle (radians) - clamped to pitch_limits
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel (default: 0.002)
    pub sensitivity: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width / height
    aspect: f32,
    /// Pitch limits (min, max) in radians
    pitch_limits: (f32, f32),
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl FpsCamera {
    /// Create a camera with default settings, looking toward -Z.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a camera from configuration. Starts at eye height above the
    /// origin, looking toward -Z, with a 16:9 aspect until the first resize.
    pub fn from_config(config: &CameraConfig) -> Self {
        let limit = config.pitch_limit_degrees.to_radians();
        Self {
            position: Vec3::new(0.0, 1.7, 5.0),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            aspect: 16.0 / 9.0,
            pitch_limits: (-limit, limit),
        }
    }

    /// Create a camera at a custom position
    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the current camera position
    #[inline]
    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    /// Set the camera position directly
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Get the current yaw angle in radians
    #[inline]
    pub fn get_yaw(&self) -> f32 {
        self.yaw
    }

    /// Set the yaw angle directly (in radians)
    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Get the current pitch angle in radians
    #[inline]
    pub fn get_pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch angle directly (in radians, will be clamped to limits)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Get the pitch limits in radians (min, max)
    #[inline]
    pub fn get_pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Apply mouse movement delta to rotate the camera
    ///
    /// # Arguments
    /// * `dx` - Mouse movement in X (pixels). Positive = move right = look right (increase yaw)
    /// * `dy` - Mouse movement in Y (pixels). Positive = move down = look down (decrease pitch)
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Direction the camera is looking, derived from yaw and pitch.
    ///
    /// # Coordinate System
    /// - +X = right
    /// - +Y = up
    /// - -Z = forward when yaw=0 and pitch=0
    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right direction, perpendicular to forward in the horizontal plane.
    #[inline]
    pub fn get_right(&self) -> Vec3 {
        self.get_forward().cross(Vec3::Y).normalize()
    }

    /// Up direction, perpendicular to both forward and right.
    #[inline]
    pub fn get_up(&self) -> Vec3 {
        let forward = self.get_forward();
        let right = self.get_right();
        right.cross(forward).normalize()
    }

    /// Current viewport aspect ratio.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Update the projection for a new viewport size. A zero-sized
    /// viewport (minimized window) is ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.get_forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix for the renderer.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let camera = FpsCamera::new();
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.sensitivity, 0.002);
        assert!((camera.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_pitch_limits_are_89_degrees() {
        let camera = FpsCamera::new();
        let expected_limit = 89.0 * std::f32::consts::PI / 180.0;
        assert!((camera.pitch_limits.0 - (-expected_limit)).abs() < 0.001);
        assert!((camera.pitch_limits.1 - expected_limit).abs() < 0.001);
    }

    #[test]
    fn test_apply_mouse_delta_yaw() {
        let mut camera = FpsCamera::new();
        camera.apply_mouse_delta(100.0, 0.0);

        // Yaw should increase by 100 * 0.002 = 0.2 radians
        assert!((camera.yaw - 0.2).abs() < 0.001);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_apply_mouse_delta_pitch() {
        let mut camera = FpsCamera::new();
        camera.apply_mouse_delta(0.0, 100.0);

        // Moving the mouse down looks down
        assert!((camera.pitch - (-0.2)).abs() < 0.001);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut camera = FpsCamera::new();
        let max_pitch = 89.0 * std::f32::consts::PI / 180.0;

        camera.apply_mouse_delta(0.0, -100000.0);
        assert!((camera.pitch - max_pitch).abs() < 0.001);

        camera.apply_mouse_delta(0.0, 200000.0);
        assert!((camera.pitch + max_pitch).abs() < 0.001);

        camera.set_pitch(10.0);
        assert!((camera.pitch - max_pitch).abs() < 0.001);
    }

    #[test]
    fn test_forward_vector_at_origin() {
        let camera = FpsCamera::new();
        let forward = camera.get_forward();
        assert!(forward.x.abs() < 0.001);
        assert!(forward.y.abs() < 0.001);
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_direction_vectors_orthonormal() {
        let mut camera = FpsCamera::new();
        camera.apply_mouse_delta(123.0, 45.0);

        let forward = camera.get_forward();
        let right = camera.get_right();
        let up = camera.get_up();

        assert!((forward.length() - 1.0).abs() < 0.001);
        assert!((right.length() - 1.0).abs() < 0.001);
        assert!((up.length() - 1.0).abs() < 0.001);
        assert!(forward.dot(right).abs() < 0.001);
        assert!(forward.dot(up).abs() < 0.001);
        assert!(right.y.abs() < 0.001);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = FpsCamera::new();
        camera.set_aspect(800, 600);
        assert!((camera.aspect() - 4.0 / 3.0).abs() < 1e-6);

        // Minimized window keeps the previous aspect
        camera.set_aspect(800, 0);
        assert!((camera.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_projection_centers_forward_point() {
        let mut camera = FpsCamera::with_position(Vec3::new(0.0, 1.0, 0.0));
        camera.set_aspect(1920, 1080);
        let target = camera.position + camera.get_forward() * 10.0;

        let clip = camera.view_projection() * target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
