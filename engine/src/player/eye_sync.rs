//! Camera-body synchronization.
//!
//! After each physics step the camera is moved to the player body's
//! position, raised by a fixed eye offset. Orientation is untouched.

use glam::Vec3;

use crate::camera::FpsCamera;

/// Default height of the eye above the body's center, in meters
pub const DEFAULT_EYE_OFFSET: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeSync {
    eye_offset: f32,
}

impl Default for EyeSync {
    fn default() -> Self {
        Self::new(DEFAULT_EYE_OFFSET)
    }
}

impl EyeSync {
    pub fn new(eye_offset: f32) -> Self {
        Self { eye_offset }
    }

    #[inline]
    pub fn eye_offset(&self) -> f32 {
        self.eye_offset
    }

    /// Eye position for a body at `body_position`.
    #[inline]
    pub fn eye_position(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::new(0.0, self.eye_offset, 0.0)
    }

    /// Overwrite the camera position from the body position.
    pub fn apply(&self, camera: &mut FpsCamera, body_position: Vec3) {
        camera.set_position(self.eye_position(body_position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_is_offset_vertically() {
        let sync = EyeSync::default();
        let mut camera = FpsCamera::new();
        let body = Vec3::new(3.0, 1.25, -7.5);

        sync.apply(&mut camera, body);

        assert_eq!(camera.position.x, body.x);
        assert_eq!(camera.position.y, body.y + 0.6);
        assert_eq!(camera.position.z, body.z);
    }

    #[test]
    fn test_orientation_is_preserved() {
        let sync = EyeSync::new(1.0);
        let mut camera = FpsCamera::new();
        camera.apply_mouse_delta(200.0, 50.0);
        let (yaw, pitch) = (camera.yaw, camera.pitch);

        sync.apply(&mut camera, Vec3::ZERO);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, 0.0));
    }
}
