use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::geometry::Mesh;
use crate::renderer::camera::{OrbitCamera, SceneUniform};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.95,
    g: 0.95,
    b: 0.95,
    a: 1.0,
};

/// GPU-side mesh record: one buffer per vertex attribute plus the two
/// index streams. Built whole by `upload` and replaced whole on
/// regeneration. The old record stays valid until the swap, and nothing
/// mutates a live record in place.
pub struct MeshBuffers {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub fill_index_buffer: wgpu::Buffer,
    pub edge_index_buffer: wgpu::Buffer,
    pub fill_index_count: u32,
    pub edge_index_count: u32,
}

impl MeshBuffers {
    /// Copies the mesh arrays into five fresh GPU buffers. The CPU mesh is
    /// not retained; after this the buffers are the source of truth until
    /// the next regeneration.
    pub fn upload(device: &wgpu::Device, mesh: &Mesh, label: &str) -> Self {
        let vertex = |suffix: &str, data: &[f32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} {suffix}")),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let index = |suffix: &str, data: &[u16]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} {suffix}")),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX,
            })
        };

        Self {
            position_buffer: vertex("Positions", &mesh.positions),
            normal_buffer: vertex("Normals", &mesh.normals),
            color_buffer: vertex("Colors", &mesh.colors),
            fill_index_buffer: index("Fill Indices", &mesh.fill_indices),
            edge_index_buffer: index("Edge Indices", &mesh.edge_indices),
            fill_index_count: mesh.fill_indices.len() as u32,
            edge_index_count: mesh.edge_indices.len() as u32,
        }
    }
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    pub pipeline_fill: wgpu::RenderPipeline,
    pub pipeline_edges: wgpu::RenderPipeline,

    pub scene_buffer: wgpu::Buffer,
    pub scene_bind_group: wgpu::BindGroup,

    pub torus: MeshBuffers,
    pub knot: MeshBuffers,
    pub sphere: MeshBuffers,

    pub depth_texture: wgpu::TextureView,
}

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 16,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x4,
        }],
    }
}

impl GpuState {
    pub async fn new(
        window: std::sync::Arc<winit::window::Window>,
        torus: &Mesh,
        knot: &Mesh,
        sphere: &Mesh,
    ) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&scene_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = |label, topology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[position_layout(), normal_layout(), color_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let pipeline_fill = mesh_pipeline("Fill Pipeline", wgpu::PrimitiveTopology::TriangleList);
        let pipeline_edges = mesh_pipeline("Edge Pipeline", wgpu::PrimitiveTopology::LineList);

        let torus = MeshBuffers::upload(&device, torus, "Torus");
        let knot = MeshBuffers::upload(&device, knot, "Knot");
        let sphere = MeshBuffers::upload(&device, sphere, "Sphere");

        let depth_texture = Self::create_depth_texture(&device, &config);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            pipeline_fill,
            pipeline_edges,
            scene_buffer,
            scene_bind_group,
            torus,
            knot,
            sphere,
            depth_texture,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = if enabled {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    pub fn update_scene(&self, camera: &OrbitCamera, light_pos: Vec3) {
        let uniform = SceneUniform::new(camera, light_pos);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Torus + knot scene. Each mesh draws its fill unless switched to
    /// wireframe, and always overlays its edge lines on top.
    pub fn render_curves(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        torus_wireframe: bool,
        knot_wireframe: bool,
    ) {
        let mut render_pass = self.begin_scene_pass(view, encoder, "Curves Render Pass");
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

        for (record, wireframe) in [(&self.torus, torus_wireframe), (&self.knot, knot_wireframe)] {
            render_pass.set_vertex_buffer(0, record.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, record.normal_buffer.slice(..));
            render_pass.set_vertex_buffer(2, record.color_buffer.slice(..));

            if !wireframe {
                render_pass.set_pipeline(&self.pipeline_fill);
                render_pass
                    .set_index_buffer(record.fill_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..record.fill_index_count, 0, 0..1);
            }

            render_pass.set_pipeline(&self.pipeline_edges);
            render_pass
                .set_index_buffer(record.edge_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..record.edge_index_count, 0, 0..1);
        }
    }

    /// Sphere scene: fill or wireframe, never both.
    pub fn render_sphere(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        wireframe: bool,
    ) {
        let mut render_pass = self.begin_scene_pass(view, encoder, "Sphere Render Pass");
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

        let record = &self.sphere;
        render_pass.set_vertex_buffer(0, record.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, record.normal_buffer.slice(..));
        render_pass.set_vertex_buffer(2, record.color_buffer.slice(..));

        if wireframe {
            render_pass.set_pipeline(&self.pipeline_edges);
            render_pass
                .set_index_buffer(record.edge_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..record.edge_index_count, 0, 0..1);
        } else {
            render_pass.set_pipeline(&self.pipeline_fill);
            render_pass
                .set_index_buffer(record.fill_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..record.fill_index_count, 0, 0..1);
        }
    }

    fn begin_scene_pass<'a>(
        &'a self,
        view: &'a wgpu::TextureView,
        encoder: &'a mut wgpu::CommandEncoder,
        label: &'static str,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}
