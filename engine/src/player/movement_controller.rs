//! Player Movement Resolver
//!
//! Turns the four movement flags plus camera yaw into a horizontal velocity.
//! Movement direction is relative to camera facing direction; pitch never
//! affects it.
//!
//! # Physics Model
//!
//! - Speed: 10.0 m/s (configurable)
//! - No acceleration or deceleration: the commanded velocity is applied as-is
//!   every tick, and vertical velocity is left to the physics engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dust_arena_engine::player::MovementResolver;
//! use dust_arena_engine::input::MovementKeys;
//!
//! let resolver = MovementResolver::new(10.0);
//!
//! // Each tick:
//! let horizontal = resolver.resolve(&keys, camera.yaw, engaged);
//! world.apply_horizontal_velocity(player.body, horizontal);
//! ```

use glam::{Vec2, Vec3};

use crate::input::MovementKeys;

/// Default movement speed in meters per second
pub const DEFAULT_MOVE_SPEED: f32 = 10.0;

/// Computes camera-relative horizontal velocity from key state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementResolver {
    speed: f32,
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_SPEED)
    }
}

impl MovementResolver {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Unit-length intent in camera space: `x` is lateral (right positive),
    /// `y` is longitudinal (forward positive). Zero input stays zero, so a
    /// diagonal is never faster than a straight line.
    pub fn intent(keys: &MovementKeys) -> Vec2 {
        let lateral = keys.right_axis() as f32;
        let longitudinal = keys.forward_axis() as f32;
        Vec2::new(lateral, longitudinal).normalize_or_zero()
    }

    /// Forward direction on the XZ plane for a camera yaw.
    ///
    /// yaw 0 looks toward -Z; sin(yaw) gives X, -cos(yaw) gives Z.
    #[inline]
    pub fn forward_from_yaw(yaw: f32) -> Vec3 {
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Right direction on the XZ plane: forward × Y = (cos(yaw), 0, sin(yaw)).
    #[inline]
    pub fn right_from_yaw(yaw: f32) -> Vec3 {
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Horizontal velocity `(x, z)` for this tick.
    ///
    /// Returns zero while the view is disengaged; the caller still writes it
    /// so the body stops sliding, and vertical velocity is preserved there.
    pub fn resolve(&self, keys: &MovementKeys, yaw: f32, engaged: bool) -> Vec2 {
        if !engaged {
            return Vec2::ZERO;
        }

        let intent = Self::intent(keys);
        if intent == Vec2::ZERO {
            return Vec2::ZERO;
        }

        let direction =
            Self::forward_from_yaw(yaw) * intent.y + Self::right_from_yaw(yaw) * intent.x;
        let velocity = direction * self.speed;
        Vec2::new(velocity.x, velocity.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn keys(forward: bool, backward: bool, left: bool, right: bool) -> MovementKeys {
        MovementKeys {
            forward,
            backward,
            left,
            right,
        }
    }

    fn all_combinations() -> impl Iterator<Item = MovementKeys> {
        (0u8..16).map(|bits| {
            keys(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
            )
        })
    }

    #[test]
    fn test_intent_magnitude_never_exceeds_one() {
        for combo in all_combinations() {
            let length = MovementResolver::intent(&combo).length();
            assert!(length <= 1.0 + EPSILON, "{combo:?} gave {length}");
        }
    }

    #[test]
    fn test_diagonal_intent_is_unit() {
        let intent = MovementResolver::intent(&keys(true, false, false, true));
        assert!((intent.length() - 1.0).abs() < EPSILON);
        assert!((intent.x - intent.y).abs() < EPSILON);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let intent = MovementResolver::intent(&keys(true, true, true, true));
        assert_eq!(intent, Vec2::ZERO);
    }

    #[test]
    fn test_zero_input_zero_velocity_any_yaw() {
        let resolver = MovementResolver::default();
        for i in 0..32 {
            let yaw = i as f32 * 0.37 - 5.0;
            assert_eq!(resolver.resolve(&MovementKeys::new(), yaw, true), Vec2::ZERO);
        }
    }

    #[test]
    fn test_disengaged_forces_zero() {
        let resolver = MovementResolver::default();
        for combo in all_combinations() {
            assert_eq!(resolver.resolve(&combo, 0.3, false), Vec2::ZERO);
        }
    }

    #[test]
    fn test_forward_at_yaw_zero_moves_negative_z() {
        let resolver = MovementResolver::default();
        let v = resolver.resolve(&keys(true, false, false, false), 0.0, true);
        assert!(v.x.abs() < EPSILON);
        assert!((v.y - (-DEFAULT_MOVE_SPEED)).abs() < EPSILON);
    }

    #[test]
    fn test_right_at_yaw_zero_moves_positive_x() {
        let resolver = MovementResolver::default();
        let v = resolver.resolve(&keys(false, false, false, true), 0.0, true);
        assert!((v.x - DEFAULT_MOVE_SPEED).abs() < EPSILON);
        assert!(v.y.abs() < EPSILON);
    }

    #[test]
    fn test_yaw_rotates_forward() {
        let resolver = MovementResolver::default();

        // Quarter turn right: forward becomes +X
        let v = resolver.resolve(&keys(true, false, false, false), FRAC_PI_2, true);
        assert!((v.x - DEFAULT_MOVE_SPEED).abs() < 1e-4);
        assert!(v.y.abs() < 1e-4);

        // Half turn: forward becomes +Z
        let v = resolver.resolve(&keys(true, false, false, false), PI, true);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y - DEFAULT_MOVE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_speed_is_uniform_across_directions() {
        let resolver = MovementResolver::new(7.5);
        for combo in all_combinations() {
            let v = resolver.resolve(&combo, 1.234, true);
            let intent = MovementResolver::intent(&combo);
            if intent == Vec2::ZERO {
                assert_eq!(v, Vec2::ZERO);
            } else {
                assert!((v.length() - 7.5).abs() < 1e-4, "{combo:?}");
            }
        }
    }

    #[test]
    fn test_forward_matches_camera_look_direction() {
        let mut camera = crate::camera::FpsCamera::new();
        camera.apply_mouse_delta(321.0, -80.0);
        let look = camera.get_forward();
        let flat = Vec3::new(look.x, 0.0, look.z).normalize();
        let forward = MovementResolver::forward_from_yaw(camera.yaw);
        assert!((flat - forward).length() < 1e-4);
        let right = MovementResolver::right_from_yaw(camera.yaw);
        assert!((camera.get_right() - right).length() < 1e-4);
    }
}
