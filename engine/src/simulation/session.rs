//! Simulation Session
//!
//! Everything one `start` creates and the matching `stop` drops: the
//! physics world with its player body and level colliders, the camera,
//! and the rendering backend.

use glam::Vec3;
use rapier3d::prelude::ColliderHandle;

use super::events::TickReport;
use crate::camera::FpsCamera;
use crate::config::SimulationConfig;
use crate::error::{RenderError, SimulationResult};
use crate::input::MovementKeys;
use crate::physics::{PhysicsWorld, PlayerBody};
use crate::player::{EyeSync, MovementResolver};
use crate::render::RenderBackend;
use crate::world::{LevelLayout, build_level};

pub struct SimulationSession<R: RenderBackend> {
    physics: PhysicsWorld,
    player: PlayerBody,
    level_colliders: Vec<ColliderHandle>,
    level: LevelLayout,
    camera: FpsCamera,
    resolver: MovementResolver,
    eye: EyeSync,
    renderer: R,
    ticks: u64,
}

impl<R: RenderBackend> SimulationSession<R> {
    /// Build the world and take ownership of `renderer`. On failure the
    /// renderer is disposed before the error is returned.
    pub fn new(config: &SimulationConfig, mut renderer: R) -> SimulationResult<Self> {
        let (physics, player, level_colliders) = match Self::build_world(config) {
            Ok(parts) => parts,
            Err(e) => {
                renderer.dispose();
                return Err(e);
            }
        };

        let eye = EyeSync::new(config.eye_offset);
        let mut camera = FpsCamera::from_config(&config.camera);
        let (width, height) = renderer.size();
        camera.set_aspect(width, height);
        eye.apply(&mut camera, config.player.spawn);

        Ok(Self {
            physics,
            player,
            level_colliders,
            level: config.level.clone(),
            camera,
            resolver: MovementResolver::new(config.move_speed),
            eye,
            renderer,
            ticks: 0,
        })
    }

    fn build_world(
        config: &SimulationConfig,
    ) -> SimulationResult<(PhysicsWorld, PlayerBody, Vec<ColliderHandle>)> {
        let mut physics = PhysicsWorld::new(config.gravity)?;
        let player = physics.spawn_player(
            config.player.spawn,
            config.player.capsule_half_height,
            config.player.capsule_radius,
        )?;
        let colliders = build_level(&mut physics, &config.level);
        Ok((physics, player, colliders))
    }

    /// One tick: write the commanded horizontal velocity, step once, then
    /// move the camera to the body. Returns `None` if the player body is
    /// gone, in which case nothing was stepped.
    pub fn tick(&mut self, keys: MovementKeys, engaged: bool) -> Option<TickReport> {
        let horizontal = self.resolver.resolve(&keys, self.camera.yaw, engaged);
        let commanded_velocity = self
            .physics
            .apply_horizontal_velocity(self.player.body, horizontal)?;

        self.physics.step();

        let body_position = self.physics.translation(self.player.body)?;
        self.eye.apply(&mut self.camera, body_position);
        self.ticks += 1;

        Some(TickReport {
            tick: self.ticks,
            commanded_velocity,
            body_position,
            camera_position: self.camera.position,
        })
    }

    pub fn render(&mut self) -> Result<(), RenderError> {
        self.renderer.render(&self.level, &self.camera)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.renderer.set_size(width, height);
    }

    /// Turn the view by a raw pointer delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.camera.apply_mouse_delta(dx, dy);
    }

    /// Release the renderer. The physics world goes with `self`.
    pub fn dispose(mut self) {
        self.renderer.dispose();
    }

    pub fn camera(&self) -> &FpsCamera {
        &self.camera
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn player(&self) -> PlayerBody {
        self.player
    }

    pub fn level_colliders(&self) -> &[ColliderHandle] {
        &self.level_colliders
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn body_position(&self) -> Option<Vec3> {
        self.physics.translation(self.player.body)
    }

    pub fn body_velocity(&self) -> Option<Vec3> {
        self.physics.linvel(self.player.body)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::render::HeadlessRenderer;

    fn forward() -> MovementKeys {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys
    }

    #[test]
    fn test_new_places_camera_at_eye_height() {
        let config = SimulationConfig::default();
        let session = SimulationSession::new(&config, HeadlessRenderer::new(800, 400)).unwrap();

        let expected = config.player.spawn + Vec3::new(0.0, config.eye_offset, 0.0);
        assert_eq!(session.camera().position, expected);
        assert!((session.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(session.level_colliders().len(), config.level.boxes.len());
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_invalid_gravity_disposes_renderer() {
        let config = SimulationConfig {
            gravity: Vec3::new(0.0, f32::NAN, 0.0),
            ..Default::default()
        };
        let renderer = HeadlessRenderer::default();
        let log = renderer.log();

        assert!(SimulationSession::new(&config, renderer).is_err());
        assert!(log.snapshot().disposed);
    }

    #[test]
    fn test_tick_moves_forward_and_syncs_camera() {
        let config = SimulationConfig::default();
        let mut session = SimulationSession::new(&config, HeadlessRenderer::default()).unwrap();

        let report = session.tick(forward(), true).unwrap();
        assert_eq!(report.tick, 1);
        assert!((report.commanded_velocity.z + config.move_speed).abs() < 1e-5);
        assert!(report.body_position.z < config.player.spawn.z);
        assert_eq!(report.camera_position.y, report.body_position.y + config.eye_offset);
    }

    #[test]
    fn test_disengaged_tick_keeps_vertical_velocity() {
        let config = SimulationConfig::default();
        let mut session = SimulationSession::new(&config, HeadlessRenderer::default()).unwrap();

        // Let the body pick up some falling speed first
        for _ in 0..10 {
            session.tick(MovementKeys::new(), false);
        }
        let vy = session.body_velocity().unwrap().y;
        assert!(vy < 0.0);

        let report = session.tick(forward(), false).unwrap();
        assert_eq!(report.commanded_velocity.x, 0.0);
        assert_eq!(report.commanded_velocity.z, 0.0);
        assert_eq!(report.commanded_velocity.y, vy);
    }

    #[test]
    fn test_resize_updates_camera_and_renderer() {
        let config = SimulationConfig::default();
        let renderer = HeadlessRenderer::default();
        let log = renderer.log();
        let mut session = SimulationSession::new(&config, renderer).unwrap();

        session.resize(1000, 500);
        assert!((session.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(log.snapshot().size, (1000, 500));
    }
}
