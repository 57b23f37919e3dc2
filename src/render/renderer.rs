//! Forward renderer
//!
//! One pipeline, one pass: every visible mesh is drawn with a solid colour,
//! lit by the scene's ambient term and its first directional light. Per-draw
//! data lives in a single dynamic-offset uniform buffer that grows on demand.

use std::num::NonZeroU64;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::errors::Result;
use crate::render::context::WgpuContext;
use crate::render::settings::RenderSettings;
use crate::resources::geometry::{Geometry, Vertex};
use crate::scene::{LightKind, Scene};

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view_projection: [[f32; 4]; 4],
    ambient: [f32; 4],
    light_direction: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;
const INITIAL_DRAW_CAPACITY: u64 = 64;

struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Dynamic uniform buffer holding one `DrawUniforms` per draw.
struct DrawBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: u64,
}

impl DrawBuffer {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, stride: u64, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniforms"),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(DRAW_UNIFORM_SIZE),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
        }
    }
}

/// GPU state, created once a window exists.
struct RenderState {
    context: WgpuContext,
    pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draws: DrawBuffer,
    geometries: FxHashMap<u64, GpuGeometry>,
}

pub struct Renderer {
    settings: RenderSettings,
    state: Option<RenderState>,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings, state: None }
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Creates the device, surface and pipeline for `window`.
    pub async fn init(&mut self, window: Arc<Window>) -> Result<()> {
        let size = window.inner_size();
        let context = WgpuContext::new(window, &self.settings, size.width, size.height).await?;
        let device = &context.device;

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Layout"),
            entries: &[uniform_layout_entry(false)],
        });
        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Layout"),
            entries: &[uniform_layout_entry(true)],
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Global Uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let stride = DRAW_UNIFORM_SIZE.div_ceil(alignment) * alignment;
        let draws = DrawBuffer::new(device, &draw_layout, stride, INITIAL_DRAW_CAPACITY);

        let pipeline = Self::create_pipeline(&context, &global_layout, &draw_layout);

        log::info!(
            "Renderer initialized: {:?}, {}x{}",
            context.color_format(),
            context.config.width,
            context.config.height
        );

        self.state = Some(RenderState {
            context,
            pipeline,
            global_buffer,
            global_bind_group,
            draw_layout,
            draws,
            geometries: FxHashMap::default(),
        });
        Ok(())
    }

    fn create_pipeline(
        context: &WgpuContext,
        global_layout: &wgpu::BindGroupLayout,
        draw_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Forward Pipeline Layout"),
            bind_group_layouts: &[Some(global_layout), Some(draw_layout)],
            immediate_size: 0,
        });

        let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Forward Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: context.depth_format,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.color_format(),
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview_mask: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(state) = &mut self.state {
            state.context.resize(width, height);
        }
    }

    /// Draws one frame. While `loading` the overlay colour fills the viewport
    /// and the scene is not drawn.
    pub fn render(&mut self, scene: &Scene, loading: bool) {
        let Some(state) = &mut self.state else {
            return;
        };

        let (frame, suboptimal) = match state.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame) => (frame, false),
            wgpu::CurrentSurfaceTexture::Suboptimal(frame) => (frame, true),
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                state.context.reconfigure();
                return;
            }
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => return,
            wgpu::CurrentSurfaceTexture::Validation => {
                log::error!("Surface validation error, skipping frame");
                return;
            }
        };

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let clear = if loading {
            self.settings.overlay_color.over(self.settings.clear_color)
        } else {
            self.settings.clear_color
        };

        let draw_list = if loading {
            Vec::new()
        } else {
            state.prepare(scene)
        };

        let mut encoder = state
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Forward Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_linear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.context.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !draw_list.is_empty() {
                pass.set_pipeline(&state.pipeline);
                pass.set_bind_group(0, &state.global_bind_group, &[]);

                for (slot, geometry_id) in draw_list.iter().enumerate() {
                    let Some(gpu) = state.geometries.get(geometry_id) else {
                        continue;
                    };
                    let Ok(offset) = u32::try_from(slot as u64 * state.draws.stride) else {
                        break;
                    };
                    pass.set_bind_group(1, &state.draws.bind_group, &[offset]);
                    pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }
        }

        state.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        if suboptimal {
            state.context.reconfigure();
        }
    }
}

impl RenderState {
    /// Uploads globals, per-draw uniforms and any new geometry. Returns the
    /// geometry id of each draw, in uniform-slot order.
    fn prepare(&mut self, scene: &Scene) -> Vec<u64> {
        self.write_globals(scene);

        let mut draw_ids = Vec::new();
        let mut uniforms = Vec::new();
        let mut live = FxHashSet::default();

        for (mesh, world) in scene.iter_meshes() {
            let geometry = &mesh.geometry;
            if geometry.index_count() == 0 {
                continue;
            }
            if !self.geometries.contains_key(&geometry.id()) {
                let gpu = upload_geometry(&self.context.device, geometry);
                self.geometries.insert(geometry.id(), gpu);
            }
            live.insert(geometry.id());

            let model = Mat4::from(*world);
            uniforms.push(DrawUniforms {
                model: model.to_cols_array_2d(),
                normal_matrix: model.inverse().transpose().to_cols_array_2d(),
                color: mesh.material.color.to_array(),
            });
            draw_ids.push(geometry.id());
        }

        self.geometries.retain(|id, _| live.contains(id));

        let count = uniforms.len() as u64;
        if count > self.draws.capacity {
            let capacity = count.next_power_of_two();
            log::debug!("Growing draw uniform buffer to {capacity} slots");
            self.draws = DrawBuffer::new(&self.context.device, &self.draw_layout, self.draws.stride, capacity);
        }

        let stride = self.draws.stride as usize;
        let mut bytes = vec![0u8; stride * uniforms.len()];
        for (i, u) in uniforms.iter().enumerate() {
            let start = i * stride;
            bytes[start..start + DRAW_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(u));
        }
        if !bytes.is_empty() {
            self.context.queue.write_buffer(&self.draws.buffer, 0, &bytes);
        }

        draw_ids
    }

    fn write_globals(&self, scene: &Scene) {
        let mut ambient = Vec3::ZERO;
        let mut light_direction = Vec3::Y;
        let mut light_color = Vec3::ZERO;
        let mut has_directional = false;

        for (light, world) in scene.iter_lights() {
            match light.kind {
                LightKind::Ambient => ambient += light.radiance(),
                LightKind::Directional { target } if !has_directional => {
                    let position = Vec3::from(world.translation);
                    light_direction = (position - target).normalize_or(Vec3::Y);
                    light_color = light.radiance();
                    has_directional = true;
                }
                LightKind::Directional { .. } => {}
            }
        }

        let globals = GlobalUniforms {
            view_projection: scene.camera.view_projection().to_cols_array_2d(),
            ambient: ambient.extend(1.0).to_array(),
            light_direction: light_direction.extend(0.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
        };
        self.context
            .queue
            .write_buffer(&self.global_buffer, 0, bytemuck::bytes_of(&globals));
    }
}

fn uniform_layout_entry(dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: None,
        },
        count: None,
    }
}

fn upload_geometry(device: &wgpu::Device, geometry: &Geometry) -> GpuGeometry {
    let vertices = geometry.interleaved();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Index Buffer"),
        contents: bytemuck::cast_slice(&geometry.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuGeometry {
        vertex_buffer,
        index_buffer,
        index_count: u32::try_from(geometry.indices.len()).unwrap_or(u32::MAX),
    }
}
