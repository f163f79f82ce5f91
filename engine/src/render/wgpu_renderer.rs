//! Windowed rendering backend on wgpu.

use std::sync::Arc;

use winit::window::Window;

use super::RenderBackend;
use super::gpu_context::{GpuContext, GpuContextConfig};
use super::mesh::level_mesh;
use super::mesh_pass::{MeshPass, SceneUniforms, sky_clear_color};
use crate::camera::FpsCamera;
use crate::error::RenderError;
use crate::world::LevelLayout;

/// Draws the level into a window surface.
///
/// The level mesh is uploaded once at creation; each frame only the
/// camera and lighting uniforms change.
pub struct WgpuRenderer {
    gpu: Option<GpuContext>,
    pass: Option<MeshPass>,
    size: (u32, u32),
}

impl WgpuRenderer {
    pub fn new(
        window: Arc<Window>,
        level: &LevelLayout,
        config: GpuContextConfig,
    ) -> Result<Self, RenderError> {
        let gpu = GpuContext::new(window, config)?;
        let mesh = level_mesh(level);
        let pass = MeshPass::new(&gpu, &mesh);
        let size = gpu.dimensions();

        tracing::debug!(
            triangles = mesh.triangle_count(),
            width = size.0,
            height = size.1,
            "wgpu renderer ready"
        );

        Ok(Self {
            gpu: Some(gpu),
            pass: Some(pass),
            size,
        })
    }

    pub fn is_disposed(&self) -> bool {
        self.gpu.is_none()
    }
}

impl RenderBackend for WgpuRenderer {
    fn render(&mut self, level: &LevelLayout, camera: &FpsCamera) -> Result<(), RenderError> {
        let (Some(gpu), Some(pass)) = (self.gpu.as_mut(), self.pass.as_ref()) else {
            return Err(RenderError::Disposed);
        };

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(e) => return Err(RenderError::Frame(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        pass.upload_uniforms(&gpu.queue, &SceneUniforms::from_scene(level, camera));

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });
        pass.record(&mut encoder, &view, &gpu.depth_view, sky_clear_color(level));
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(width, height);
        }
    }

    fn dispose(&mut self) {
        if self.gpu.is_some() {
            tracing::debug!("wgpu renderer disposed");
        }
        self.pass = None;
        self.gpu = None;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
