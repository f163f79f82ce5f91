//! Simulation Configuration
//!
//! Every tunable the session uses, with defaults matching the shipped demo:
//! 10 m/s walk speed, 0.6 m eye offset, a 0.5/0.3 capsule dropped at
//! (0, 5, 5) and the dust arena level layout. Values can be overridden from
//! a JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulationResult};
use crate::world::LevelLayout;

/// Player capsule body parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Where the capsule center starts (dropped from above the floor)
    pub spawn: Vec3,
    /// Half-height of the capsule's cylindrical section
    pub capsule_half_height: f32,
    /// Capsule radius
    pub capsule_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 5.0, 5.0),
            capsule_half_height: 0.5,
            capsule_radius: 0.3,
        }
    }
}

/// Camera projection and look parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Mouse sensitivity in radians per pixel
    pub sensitivity: f32,
    /// Symmetric pitch clamp in degrees
    pub pitch_limit_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.002,
            pitch_limit_degrees: 89.0,
        }
    }
}

/// Top-level configuration for a simulation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Horizontal walk speed in units per second
    pub move_speed: f32,
    /// Camera height above the capsule center
    pub eye_offset: f32,
    /// World gravity vector in m/s²
    pub gravity: Vec3,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub level: LevelLayout,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            eye_offset: 0.6,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            player: PlayerConfig::default(),
            camera: CameraConfig::default(),
            level: LevelLayout::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON text. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> SimulationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimulationError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON (used to dump the defaults as a template).
    pub fn to_json_pretty(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the physics world or camera unusable.
    pub fn validate(&self) -> SimulationResult<()> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(invalid(format!(
                "move_speed must be finite and >= 0, got {}",
                self.move_speed
            )));
        }
        if !self.eye_offset.is_finite() {
            return Err(invalid("eye_offset must be finite".to_string()));
        }
        if !self.gravity.is_finite() {
            return Err(invalid(format!("gravity must be finite, got {}", self.gravity)));
        }

        let player = &self.player;
        if !player.spawn.is_finite() {
            return Err(invalid(format!("player spawn must be finite, got {}", player.spawn)));
        }
        if !(player.capsule_half_height > 0.0 && player.capsule_half_height.is_finite()) {
            return Err(invalid("capsule_half_height must be > 0".to_string()));
        }
        if !(player.capsule_radius > 0.0 && player.capsule_radius.is_finite()) {
            return Err(invalid("capsule_radius must be > 0".to_string()));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if !camera.sensitivity.is_finite() {
            return Err(invalid("camera sensitivity must be finite".to_string()));
        }
        if !(camera.pitch_limit_degrees > 0.0 && camera.pitch_limit_degrees < 90.0) {
            return Err(invalid("pitch_limit_degrees must be in (0, 90)".to_string()));
        }

        self.level.validate()
    }
}

fn invalid(message: String) -> SimulationError {
    SimulationError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.move_speed, 10.0);
        assert_eq!(config.eye_offset, 0.6);
        assert_eq!(config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(config.player.spawn, Vec3::new(0.0, 5.0, 5.0));
        assert_eq!(config.player.capsule_half_height, 0.5);
        assert_eq!(config.player.capsule_radius, 0.3);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json_str(r#"{ "move_speed": 6.5 }"#).unwrap();
        assert_eq!(config.move_speed, 6.5);
        assert_eq!(config.eye_offset, 0.6);
        assert_eq!(config.level, LevelLayout::default());
    }

    #[test]
    fn test_nested_override() {
        let json =
            r#"{ "player": { "spawn": [1.0, 3.0, -2.0] }, "camera": { "fov_degrees": 90.0 } }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.player.spawn, Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(config.player.capsule_radius, 0.3);
        assert_eq!(config.camera.fov_degrees, 90.0);
        assert_eq!(config.camera.near, 0.1);
    }

    #[test]
    fn test_rejects_bad_capsule() {
        let json = r#"{ "player": { "capsule_radius": 0.0 } }"#;
        let err = SimulationConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = SimulationConfig {
            move_speed: -1.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_clip_planes() {
        let mut config = SimulationConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationConfig::from_json_str("{ move_speed: ").unwrap_err();
        assert!(matches!(err, SimulationError::ConfigParse(_)));
    }

    #[test]
    fn test_json_template_parses_back() {
        let json = SimulationConfig::default().to_json_pretty().unwrap();
        let parsed = SimulationConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, SimulationConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::load("/nonexistent/dust_arena.json").unwrap_err();
        assert!(matches!(err, SimulationError::ConfigIo { .. }));
    }
}
