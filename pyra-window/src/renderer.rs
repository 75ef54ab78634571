use bytemuck::Zeroable;
use pyra_core::Mesh;
use wgpu::util::DeviceExt;

use crate::error::{ShaderError, ShaderStage};
use crate::gpu::{Gpu, DEPTH_FORMAT};
use crate::uniforms::Uniforms;

const SHADER_SOURCE: &str = include_str!("shader.wgsl");
const FLOAT3: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;

/// The one shader program, vertex buffer and uniform block of the scene.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Byte offset where the color block starts.
    color_offset: wgpu::BufferAddress,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(gpu: &Gpu, mesh: &Mesh, clear_color: [f32; 4]) -> Result<Self, ShaderError> {
        let device = gpu.device();

        let module = with_validation(device, ShaderStage::Compile, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("pyra shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
            })
        })?;
        log::debug!("shader module compiled");

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pyra uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pyra uniforms layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pyra uniforms bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pyra pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = with_validation(device, ShaderStage::Link, || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("pyra pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &vertex_layouts(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.surface_format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        })?;
        log::debug!("render pipeline linked");

        let floats = mesh.blocked_floats();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pyra vertices"),
            contents: bytemuck::cast_slice(&floats),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let vertex_count = mesh.vertex_count() as u32;
        log::info!("uploaded {vertex_count} vertices");

        Ok(Self {
            pipeline,
            vertex_buffer,
            color_offset: vertex_count as wgpu::BufferAddress * FLOAT3,
            vertex_count,
            uniform_buffer,
            bind_group,
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: clear_color[3] as f64,
            },
        })
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pyra scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..self.color_offset));
        pass.set_vertex_buffer(1, self.vertex_buffer.slice(self.color_offset..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Positions and colors live in two consecutive blocks of one buffer,
/// bound as separate vertex buffers.
fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const COLOR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    [
        wgpu::VertexBufferLayout {
            array_stride: FLOAT3,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION,
        },
        wgpu::VertexBufferLayout {
            array_stride: FLOAT3,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR,
        },
    ]
}

/// Runs `create` inside a validation error scope and turns a captured error
/// into a `ShaderError` for `stage`.
fn with_validation<T>(
    device: &wgpu::Device,
    stage: ShaderStage,
    create: impl FnOnce() -> T,
) -> Result<T, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(ShaderError::new(stage, err)),
        None => Ok(value),
    }
}
