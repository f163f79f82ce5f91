//! Player Module
//!
//! Provides player character movement and camera attachment.
//!
//! # Components
//!
//! - [`MovementResolver`] - Camera-relative WASD/arrow movement as a horizontal velocity
//! - [`EyeSync`] - Places the camera at the player body's eye height after each step

pub mod eye_sync;
pub mod movement_controller;

pub use eye_sync::{DEFAULT_EYE_OFFSET, EyeSync};
pub use movement_controller::{DEFAULT_MOVE_SPEED, MovementResolver};
