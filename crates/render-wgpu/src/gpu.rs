use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use sandbox_assets::AssetFs;
use sandbox_common::PrimitiveKind;
use sandbox_render::{MeshData, MeshVertex, RenderSettings, RenderView, Scene};
use wgpu::util::DeviceExt;

use crate::RenderError;
use crate::shaders::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::texture::{self, GpuTexture};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl From<MeshVertex> for Vertex {
    fn from(v: MeshVertex) -> Self {
        Self {
            position: v.position,
            uv: v.uv,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
}

impl From<Mat4> for InstanceData {
    fn from(model: Mat4) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
        }
    }
}

/// Device features the renderer uses when the adapter offers them.
pub fn optional_features(available: wgpu::Features) -> wgpu::Features {
    available & wgpu::Features::POLYGON_MODE_LINE
}

fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

struct MeshBuffers {
    kind: PrimitiveKind,
    vertices: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
    draw_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, kind: PrimitiveKind) -> Self {
        let mesh = MeshData::for_primitive(kind);
        let vertex_data: Vec<Vertex> = mesh.vertices.iter().copied().map(Vertex::from).collect();
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = mesh.is_indexed().then(|| {
            // index buffers must be a multiple of 4 bytes
            let mut data = mesh.indices.clone();
            if data.len() % 2 == 1 {
                data.push(0);
            }
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_index_buffer"),
                contents: bytemuck::cast_slice(&data),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        Self {
            kind,
            vertices,
            indices,
            draw_count: mesh.draw_count(),
        }
    }
}

/// Filled pipeline plus the optional line-mode pipeline.
struct Pipelines {
    fill: wgpu::RenderPipeline,
    line: Option<wgpu::RenderPipeline>,
}

/// wgpu renderer for textured, instanced scene primitives.
pub struct WgpuRenderer {
    pipelines: Pipelines,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    mesh: MeshBuffers,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    line_mode_supported: bool,
}

impl WgpuRenderer {
    /// Build all GPU resources. Textures come from `fs` with checkerboard
    /// fallbacks; a broken shader in `fs` is reported as an error.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        fs: &AssetFs,
        primitive: PrimitiveKind,
    ) -> Result<Self, RenderError> {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let base_image = texture::load_or_fallback(
            fs,
            texture::BASE_TEXTURE,
            [[170, 120, 60, 255], [110, 75, 40, 255]],
        );
        let overlay_image = texture::load_or_fallback(
            fs,
            texture::OVERLAY_TEXTURE,
            [[255, 255, 255, 255], [40, 40, 40, 255]],
        );
        let base = GpuTexture::upload(device, queue, &base_image, "base_texture");
        let overlay = GpuTexture::upload(device, queue, &overlay_image, "overlay_texture");
        let sampler = texture::create_sampler(device);
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&base.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&overlay.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let line_mode_supported = device.features().contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode_supported {
            tracing::warn!("adapter lacks POLYGON_MODE_LINE, wireframe toggle disabled");
        }

        let source = shaders::load_scene_shader(fs)?;
        let pipelines = build_pipelines_checked(
            device,
            &pipeline_layout,
            surface_format,
            &source,
            line_mode_supported,
        )?;

        let mesh = MeshBuffers::new(device, primitive);
        let instance_capacity = sandbox_render::OBJECT_POSITIONS.len();
        let instance_buffer = create_instance_buffer(device, instance_capacity);
        let depth_texture = create_depth_texture(device, width, height);

        tracing::debug!(
            "renderer ready: format={surface_format:?} size={width}x{height} primitive={}",
            primitive.label()
        );

        Ok(Self {
            pipelines,
            pipeline_layout,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            mesh,
            instance_buffer,
            instance_capacity,
            depth_texture,
            surface_format,
            line_mode_supported,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
    }

    pub fn supports_wireframe(&self) -> bool {
        self.line_mode_supported
    }

    /// Swap the mesh buffers. No-op when `kind` is already loaded.
    pub fn set_primitive(&mut self, device: &wgpu::Device, kind: PrimitiveKind) {
        if self.mesh.kind != kind {
            tracing::info!("primitive: {} -> {}", self.mesh.kind.label(), kind.label());
            self.mesh = MeshBuffers::new(device, kind);
        }
    }

    /// Rebuild the pipelines from `source`. On failure the previous
    /// pipelines stay active.
    pub fn reload_shaders(&mut self, device: &wgpu::Device, source: &str) -> Result<(), RenderError> {
        let pipelines = build_pipelines_checked(
            device,
            &self.pipeline_layout,
            self.surface_format,
            source,
            self.line_mode_supported,
        )?;
        self.pipelines = pipelines;
        Ok(())
    }

    /// Render one frame of `scene` into `target`.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &RenderView,
        scene: &Scene,
        elapsed: f32,
        settings: &RenderSettings,
    ) {
        self.set_primitive(device, scene.primitive);

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view.view_projection().to_cols_array_2d(),
            }),
        );

        let instances: Vec<InstanceData> = scene
            .model_matrices(elapsed)
            .into_iter()
            .map(InstanceData::from)
            .collect();
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let pipeline = match (&self.pipelines.line, settings.wireframe) {
            (Some(line), true) => line,
            _ => &self.pipelines.fill,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(settings.clear_color)),
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
                ..Default::default()
            });

            if !instances.is_empty() {
                let count = instances.len() as u32;
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_bind_group(1, &self.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, self.mesh.vertices.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                match &self.mesh.indices {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                        pass.draw_indexed(0..self.mesh.draw_count, 0, 0..count);
                    }
                    None => pass.draw(0..self.mesh.draw_count, 0..count),
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Build pipelines inside a validation error scope so a bad shader becomes
/// an error instead of a device panic.
fn build_pipelines_checked(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    source: &str,
    with_lines: bool,
) -> Result<Pipelines, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let fill = create_pipeline(device, layout, &module, format, wgpu::PolygonMode::Fill);
    let line = with_lines
        .then(|| create_pipeline(device, layout, &module, format, wgpu::PolygonMode::Line));
    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(RenderError::ShaderCompile(error.to_string())),
        None => Ok(Pipelines { fill, line }),
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(match polygon_mode {
            wgpu::PolygonMode::Line => "scene_pipeline_line",
            _ => "scene_pipeline_fill",
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x2,
                    ],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        2 => Float32x4,
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                    ],
                },
            ],
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            polygon_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_buffer"),
        size: (capacity.max(1) * std::mem::size_of::<InstanceData>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
