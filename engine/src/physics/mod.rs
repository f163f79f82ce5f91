//! Physics module for the Dust Arena engine
//!
//! Rigid-body simulation is delegated to rapier3d. This module wraps it in
//! a [`PhysicsWorld`] that exposes only what the simulation loop needs:
//! fixed-step stepping, a capsule player body and static box colliders.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`types`] - glam <-> rapier vector conversions
//! - [`world`] - The rapier world owner and player body handles

pub mod types;
pub mod world;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
pub use types::{to_glam, to_rapier};
pub use world::{PhysicsWorld, PlayerBody};
