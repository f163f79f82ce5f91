//! Physics World
//!
//! Thin owner of a rapier3d world: one dynamic capsule for the player plus
//! any number of fixed cuboids for the level. `step` always advances by the
//! engine's default fixed timestep; there is no variable-dt accumulation.

use glam::{Vec2, Vec3};
use rapier3d::prelude::*;

use super::types::{to_glam, to_rapier};
use crate::error::{SimulationError, SimulationResult};

/// Handles for the player's capsule body and its collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// A rapier world plus the bookkeeping needed to step it.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Number of completed steps
    steps: u64,
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity.
    ///
    /// Fails if gravity is not finite or the default timestep is unusable;
    /// this is the physics half of a session's initialization.
    pub fn new(gravity: Vec3) -> SimulationResult<Self> {
        if !gravity.is_finite() {
            return Err(SimulationError::Physics(format!("gravity must be finite, got {gravity}")));
        }

        let integration_parameters = IntegrationParameters::default();
        if !(integration_parameters.dt > 0.0 && integration_parameters.dt.is_finite()) {
            return Err(SimulationError::Physics(format!(
                "engine timestep must be positive, got {}",
                integration_parameters.dt
            )));
        }

        Ok(Self {
            gravity: to_rapier(gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            steps: 0,
        })
    }

    /// Seconds simulated by one call to [`step`](Self::step).
    #[inline]
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn gravity(&self) -> Vec3 {
        to_glam(&self.gravity)
    }

    /// Advance the simulation by exactly one fixed timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Number of steps taken since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Add an immovable box (ground, wall, prop).
    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed().translation(to_rapier(center)).build();
        let body_handle = self.bodies.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies)
    }

    /// Create the player: a dynamic, rotation-locked capsule standing along Y.
    pub fn spawn_player(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
    ) -> SimulationResult<PlayerBody> {
        if !position.is_finite() {
            return Err(SimulationError::Physics(format!(
                "player spawn must be finite, got {position}"
            )));
        }
        if !(half_height > 0.0 && radius > 0.0) {
            return Err(SimulationError::Physics(format!(
                "capsule needs positive dimensions, got half_height={half_height} radius={radius}"
            )));
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(to_rapier(position))
            .lock_rotations()
            .build();
        let body = self.bodies.insert(body);
        let collider = ColliderBuilder::capsule_y(half_height, radius).build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        Ok(PlayerBody { body, collider })
    }

    /// World position of a body's center.
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| to_glam(b.translation()))
    }

    /// Current linear velocity of a body.
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| to_glam(b.linvel()))
    }

    /// Overwrite a body's linear velocity, always waking it.
    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.set_linvel(to_rapier(velocity), true);
                true
            }
            None => false,
        }
    }

    /// Write a horizontal (x, z) velocity while keeping the body's own
    /// vertical velocity. Returns the velocity actually written, or `None`
    /// if the handle no longer refers to a body.
    pub fn apply_horizontal_velocity(
        &mut self,
        handle: RigidBodyHandle,
        horizontal: Vec2,
    ) -> Option<Vec3> {
        let body = self.bodies.get_mut(handle)?;
        let vertical = body.linvel().y;
        let velocity = Vec3::new(horizontal.x, vertical, horizontal.y);
        body.set_linvel(to_rapier(velocity), true);
        Some(velocity)
    }

    pub fn is_sleeping(&self, handle: RigidBodyHandle) -> Option<bool> {
        self.bodies.get(handle).map(|b| b.is_sleeping())
    }

    pub fn is_rotation_locked(&self, handle: RigidBodyHandle) -> Option<bool> {
        self.bodies
            .get(handle)
            .map(|b| b.locked_axes().contains(LockedAxes::ROTATION_LOCKED))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}
