//! Config Module
//!
//! Centralized, serde-loadable configuration for the simulation session.

pub mod simulation_config;

pub use simulation_config::{CameraConfig, PlayerConfig, SimulationConfig};
