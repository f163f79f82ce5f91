//! Conversions between glam and rapier's nalgebra vectors
//!
//! The rest of the engine speaks glam; only the physics world touches
//! rapier types directly.

use rapier3d::prelude::{Real, Vector};

pub use glam::{Vec2, Vec3};

#[inline]
pub fn to_rapier(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_glam(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_preserves_components() {
        let v = Vec3::new(1.5, -9.81, 0.25);
        assert_eq!(to_glam(&to_rapier(v)), v);
    }

    #[test]
    fn test_to_rapier_component_order() {
        let v = to_rapier(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!((v.x, v.y, v.z), (1.0, 2.0, 3.0));
    }
}
