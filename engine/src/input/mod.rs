//! Input Module
//!
//! Platform-agnostic movement key tracking and pointer capture state.
//! Decoupled from any specific windowing system (like winit).
//!
//! # Example
//!
//! ```rust,ignore
//! use dust_arena_engine::input::{KeyboardState, KeyCode};
//!
//! let mut keyboard = KeyboardState::new();
//! keyboard.handle_key(KeyCode::W, true); // W pressed
//! if keyboard.snapshot().forward {
//!     // Move forward
//! }
//! ```

pub mod cursor_manager;
pub mod keyboard;

pub use cursor_manager::{CaptureTransition, PointerCapture};
pub use keyboard::{KeyCode, KeyboardState, MoveDirection, MovementKeys};
