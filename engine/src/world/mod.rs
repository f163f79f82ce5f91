//! World Module
//!
//! Static level description shared by the physics world (as fixed
//! colliders) and the renderer (as box meshes).

pub mod level;

pub use level::{BoxKind, LevelLayout, StaticBox, build_level, rgb_hex};
