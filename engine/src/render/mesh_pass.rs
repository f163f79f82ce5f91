//! Mesh Render Pass
//!
//! Draws the static level mesh with one directional sun plus ambient light
//! and depth testing.

use glam::Mat4;

use super::gpu_context::{DEPTH_FORMAT, GpuContext};
use super::mesh::{Mesh, MeshVertex, srgb_to_linear};
use crate::camera::FpsCamera;
use crate::world::LevelLayout;

pub const SCENE_SHADER: &str = include_str!("../../../shaders/scene.wgsl");

/// Uniform data for the scene shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz: direction the sunlight travels
    pub sun_dir: [f32; 4],
    /// x: ambient, y: sun intensity
    pub light: [f32; 4],
}

static_assertions::assert_eq_size!(SceneUniforms, [u8; 96]);

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            sun_dir: [0.0, -1.0, 0.0, 0.0],
            light: [0.6, 0.8, 0.0, 0.0],
        }
    }
}

impl SceneUniforms {
    pub fn from_scene(level: &LevelLayout, camera: &FpsCamera) -> Self {
        let sun = level.sun_direction();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            sun_dir: [sun.x, sun.y, sun.z, 0.0],
            light: [level.ambient, level.sun_intensity, 0.0, 0.0],
        }
    }
}

/// Clear colour for the sky, converted for an sRGB target.
pub fn sky_clear_color(level: &LevelLayout) -> wgpu::Color {
    let [r, g, b] = level.sky_color.map(srgb_to_linear);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// A mesh uploaded to the GPU
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn upload(gpu: &GpuContext, label: &str, mesh: &Mesh) -> Self {
        Self {
            vertex_buffer: gpu
                .create_vertex_buffer(&format!("{label} Vertex Buffer"), &mesh.vertices),
            index_buffer: gpu.create_index_buffer(&format!("{label} Index Buffer"), &mesh.indices),
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Pipeline, uniforms and the static level geometry.
pub struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    level: MeshBuffer,
}

impl MeshPass {
    pub fn new(gpu: &GpuContext, level_mesh: &Mesh) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let uniform_buffer =
            gpu.create_uniform_buffer("Scene Uniform Buffer", &SceneUniforms::default());

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let level = MeshBuffer::upload(gpu, "Level", level_mesh);

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            level,
        }
    }

    /// Upload uniforms to GPU
    pub fn upload_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record the clear and the level draw into `encoder`.
    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.level.index_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.level.vertex_buffer.slice(..));
        pass.set_index_buffer(self.level.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.level.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_from_scene() {
        let level = LevelLayout::default();
        let camera = FpsCamera::new();
        let uniforms = SceneUniforms::from_scene(&level, &camera);

        assert_eq!(uniforms.light[0], level.ambient);
        assert_eq!(uniforms.light[1], level.sun_intensity);
        // Sun is above: light travels downward
        assert!(uniforms.sun_dir[1] < 0.0);
        assert_eq!(
            uniforms.view_proj,
            camera.view_projection().to_cols_array_2d()
        );
    }

    #[test]
    fn test_sky_clear_color_is_opaque() {
        let color = sky_clear_color(&LevelLayout::default());
        assert_eq!(color.a, 1.0);
        assert!(color.r > 0.0 && color.r < 1.0);
    }
}
