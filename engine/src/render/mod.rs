//! Render Module
//!
//! Rendering backends for the simulation. The loop controller only sees
//! the [`RenderBackend`] trait; [`WgpuRenderer`] draws into a window and
//! [`HeadlessRenderer`] records calls without touching a GPU.

pub mod gpu_context;
pub mod headless;
pub mod mesh;
pub mod mesh_pass;
pub mod wgpu_renderer;

use crate::camera::FpsCamera;
use crate::error::RenderError;
use crate::world::LevelLayout;

pub use gpu_context::{GpuContext, GpuContextConfig};
pub use headless::{FrameLog, FrameLogHandle, HeadlessRenderer};
pub use mesh::{Mesh, MeshVertex, generate_box, level_mesh};
pub use mesh_pass::{SCENE_SHADER, SceneUniforms};
pub use wgpu_renderer::WgpuRenderer;

/// Draws one frame of the scene from the camera's point of view.
pub trait RenderBackend {
    /// Render the level as seen by `camera`. Errors are per-frame; the
    /// caller logs them and carries on with the next frame.
    fn render(&mut self, level: &LevelLayout, camera: &FpsCamera) -> Result<(), RenderError>;

    /// Viewport resized. Zero sizes may be ignored.
    fn set_size(&mut self, width: u32, height: u32);

    /// Release backend resources. Safe to call more than once.
    fn dispose(&mut self);

    /// Current viewport size in pixels.
    fn size(&self) -> (u32, u32);
}
