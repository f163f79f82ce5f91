//! Camera Module
//!
//! First-person camera state and projection math.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;

pub use fps_controller::FpsCamera;
