//! Dust Arena Engine Library
//!
//! First-person movement on top of a rapier3d physics world: a capsule
//! player driven by WASD/arrow keys relative to camera yaw, a camera that
//! follows the body at eye height, and a loop controller with a clean
//! start/stop lifecycle.
//!
//! # Modules
//!
//! - [`simulation`] - Loop controller, session and host abstraction
//! - [`physics`] - rapier3d world wrapper (fixed-step, one player capsule)
//! - [`player`] - Movement resolver and camera-body synchronization
//! - [`input`] - Platform-agnostic movement keys and pointer capture
//! - [`camera`] - First-person camera and projection
//! - [`render`] - Rendering backends (wgpu and headless)
//! - [`world`] - Static level layout
//! - [`config`] - JSON-loadable configuration
//!
//! # Example
//!
//! ```ignore
//! use dust_arena_engine::config::SimulationConfig;
//! use dust_arena_engine::input::KeyCode;
//! use dust_arena_engine::render::HeadlessRenderer;
//! use dust_arena_engine::simulation::{HeadlessHost, HostEvent, SimulationController};
//!
//! let mut sim = SimulationController::new(SimulationConfig::default(), HeadlessHost::new());
//! sim.start(HeadlessRenderer::default())?;
//! sim.lock_pointer();
//! sim.dispatch(HostEvent::KeyDown(KeyCode::W));
//!
//! for _ in 0..60 {
//!     sim.on_frame();
//! }
//! sim.stop();
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;
pub mod render;
pub mod simulation;
pub mod world;

pub use camera::FpsCamera;
pub use config::SimulationConfig;
pub use error::{RenderError, SimulationError, SimulationResult};
pub use input::{KeyCode, KeyboardState, MovementKeys, PointerCapture};
pub use player::{EyeSync, MovementResolver};
pub use render::{HeadlessRenderer, RenderBackend, WgpuRenderer};
pub use simulation::{
    HeadlessHost, HostEvent, SimulationController, SimulationEvent, SimulationHost,
    SimulationState, TickReport,
};
