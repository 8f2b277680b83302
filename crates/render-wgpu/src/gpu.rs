use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use scenegen_camera::PerspectiveCamera;
use scenegen_common::{EntityId, Viewport};
use scenegen_render::{RenderError, Renderer, RendererSettings};
use scenegen_scene::{Mesh, Scene};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MSAA_SAMPLES: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

/// GPU-side copy of one scene mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    wireframe: bool,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu-backed renderer binding.
pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    settings: RendererSettings,
    viewport: Viewport,
    sample_count: u32,
    bind_group_layout: wgpu::BindGroupLayout,
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    msaa_view: Option<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
    /// Size changed since the surface was last configured.
    stale: bool,
    meshes: BTreeMap<EntityId, GpuMesh>,
}

impl WgpuRenderer {
    /// Create the drawing surface on `target` and size it to `viewport`.
    ///
    /// Blocks on adapter and device acquisition.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        settings: RendererSettings,
        viewport: Viewport,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::CreateSurface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("scenegen_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::RequestDevice(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let sample_count = if settings.antialias
            && adapter
                .get_texture_format_features(format)
                .flags
                .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };

        let (width, height) = viewport.physical(settings.pixel_ratio);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: select_alpha_mode(&caps.alpha_modes, settings.alpha),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let pipeline = |label, topology| {
            create_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                PipelineParams {
                    label,
                    format,
                    topology,
                    sample_count,
                    depth: settings.depth,
                },
            )
        };
        let fill_pipeline = pipeline("fill_pipeline", wgpu::PrimitiveTopology::TriangleList);
        let line_pipeline = pipeline("line_pipeline", wgpu::PrimitiveTopology::LineList);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            alpha_mode = ?config.alpha_mode,
            sample_count,
            "drawing surface created at {}x{} physical",
            width,
            height
        );

        let mut renderer = Self {
            surface,
            device,
            queue,
            config,
            settings,
            viewport,
            sample_count,
            bind_group_layout,
            fill_pipeline,
            line_pipeline,
            msaa_view: None,
            depth_view: None,
            stale: false,
            meshes: BTreeMap::new(),
        };
        renderer.create_attachments();
        Ok(renderer)
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Record a new backing-store size; the surface is reconfigured before the next frame.
    fn resize_surface(&mut self, (width, height): (u32, u32)) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.config.width, self.config.height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.stale = true;
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.create_attachments();
        self.stale = false;
        tracing::debug!(
            width = self.config.width,
            height = self.config.height,
            "drawing surface reconfigured"
        );
    }

    fn create_attachments(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        self.msaa_view = (self.sample_count > 1).then(|| {
            create_attachment(
                &self.device,
                "msaa_color",
                self.config.format,
                width,
                height,
                self.sample_count,
            )
        });
        self.depth_view = self.settings.depth.then(|| {
            create_attachment(
                &self.device,
                "depth_texture",
                DEPTH_FORMAT,
                width,
                height,
                self.sample_count,
            )
        });
    }

    fn upload_mesh(&self, mesh: &Mesh) -> GpuMesh {
        let vertices: Vec<Vertex> = mesh
            .geometry
            .positions
            .iter()
            .map(|p| Vertex {
                position: p.to_array(),
            })
            .collect();
        let indices = if mesh.material.wireframe {
            mesh.geometry.wireframe_indices()
        } else {
            mesh.geometry.indices.clone()
        };

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: mesh.transform.matrix().to_cols_array_2d(),
                color: mesh.material.color.to_linear(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            wireframe: mesh.material.wireframe,
            uniform_buffer,
            bind_group,
        }
    }

    /// Acquire the next frame, reconfiguring once if the surface went stale.
    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| RenderError::AcquireFrame(e.to_string()))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(e) => Err(RenderError::AcquireFrame(e.to_string())),
        }
    }

    fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.settings.clear_color.to_linear();
        let premultiply = matches!(
            self.config.alpha_mode,
            wgpu::CompositeAlphaMode::PreMultiplied
        );
        let k = if premultiply { a } else { 1.0 };
        wgpu::Color {
            r: (r * k) as f64,
            g: (g * k) as f64,
            b: (b * k) as f64,
            a: a as f64,
        }
    }
}

impl Renderer for WgpuRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        for (id, mesh) in scene.meshes() {
            if !self.meshes.contains_key(id) {
                let gpu_mesh = self.upload_mesh(mesh);
                tracing::debug!(id = %id.short(), indices = gpu_mesh.index_count, "mesh uploaded");
                self.meshes.insert(*id, gpu_mesh);
            }
        }

        if self.stale {
            self.reconfigure();
        }
        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = camera.view_projection().to_cols_array_2d();
        for (id, mesh) in scene.meshes() {
            if let Some(gpu_mesh) = self.meshes.get(id) {
                self.queue.write_buffer(
                    &gpu_mesh.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&Uniforms {
                        view_proj,
                        model: mesh.transform.matrix().to_cols_array_2d(),
                        color: mesh.material.color.to_linear(),
                    }),
                );
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let (target, resolve_target, store) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&view), wgpu::StoreOp::Discard),
                None => (&view, None, wgpu::StoreOp::Store),
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color()),
                        store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                ..Default::default()
            });

            for id in scene.meshes().keys() {
                let Some(gpu_mesh) = self.meshes.get(id) else {
                    continue;
                };
                let pipeline = if gpu_mesh.wireframe {
                    &self.line_pipeline
                } else {
                    &self.fill_pipeline
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &gpu_mesh.bind_group, &[]);
                pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn size(&self) -> Viewport {
        self.viewport
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resize_surface(viewport.physical(self.settings.pixel_ratio));
    }

    fn pixel_ratio(&self) -> f64 {
        self.settings.pixel_ratio
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.settings.pixel_ratio = ratio;
        self.resize_surface(self.viewport.physical(ratio));
    }

    fn physical_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn set_physical_size(&mut self, physical: (u32, u32)) {
        self.resize_surface(physical);
    }
}

struct PipelineParams {
    label: &'static str,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    sample_count: u32,
    depth: bool,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    params: PipelineParams,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(params.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: params.format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: params.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: params.depth.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: params.sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

fn create_attachment(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

/// Pick a composite alpha mode, preferring a blended one when `transparent`.
fn select_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    transparent: bool,
) -> wgpu::CompositeAlphaMode {
    use wgpu::CompositeAlphaMode as Mode;
    let preferred: &[Mode] = if transparent {
        &[Mode::PreMultiplied, Mode::PostMultiplied, Mode::Inherit]
    } else {
        &[Mode::Opaque]
    };
    preferred
        .iter()
        .find(|m| supported.contains(m))
        .or_else(|| supported.first())
        .copied()
        .unwrap_or(Mode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode as Mode;

    #[test]
    fn transparent_prefers_premultiplied() {
        let modes = [Mode::Opaque, Mode::PostMultiplied, Mode::PreMultiplied];
        assert_eq!(select_alpha_mode(&modes, true), Mode::PreMultiplied);
    }

    #[test]
    fn transparent_falls_back_to_first_supported() {
        assert_eq!(select_alpha_mode(&[Mode::Opaque], true), Mode::Opaque);
    }

    #[test]
    fn opaque_when_transparency_not_requested() {
        let modes = [Mode::PreMultiplied, Mode::Opaque];
        assert_eq!(select_alpha_mode(&modes, false), Mode::Opaque);
    }

    #[test]
    fn empty_capabilities_use_auto() {
        assert_eq!(select_alpha_mode(&[], true), Mode::Auto);
    }

    #[test]
    fn uniform_layout_is_shader_compatible() {
        // two mat4x4 plus one vec4, no padding
        assert_eq!(std::mem::size_of::<Uniforms>(), 144);
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }
}
