// Rendering system using wgpu
//
// The renderer only consumes `Frame` snapshots; the game never talks to the
// GPU. Construction is async because adapters and devices are handed out
// through futures (promises on the web).

mod camera;
mod mesh;
mod text;
pub mod texture;
mod vertex;

pub use camera::{Camera, Perspective};
pub use mesh::{grown_capacity, DynamicBuffer, MeshRenderer, MeshUniform};
pub use text::{layout_text, TextRenderer};
pub use texture::{DepthBuffer, Texture};
pub use vertex::{MeshVertex, TextVertex};

use anyhow::Result;
use glam::{Mat4, Vec2};
use log::info;

use crate::engine::assets::GlyphAtlas;

/// Everything the renderer draws in one frame
#[derive(Debug)]
pub struct Frame<'a> {
    /// Terrain triangle list in world space
    pub terrain: &'a [MeshVertex],
    /// Changes whenever `terrain` does
    pub terrain_revision: u64,
    /// Capsule model matrix
    pub player: Option<Mat4>,
    pub view_proj: Mat4,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Overlay lines, top to bottom
    pub hud: Vec<String>,
}

/// Instance with the backends this target supports
pub fn create_instance() -> wgpu::Instance {
    let backends = if cfg!(target_arch = "wasm32") {
        wgpu::Backends::GL
    } else {
        wgpu::Backends::all()
    };

    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    })
}

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthBuffer,
    mesh_renderer: MeshRenderer,
    text_renderer: TextRenderer,
    /// Terrain revision currently on the GPU
    terrain_revision: Option<u64>,
}

impl Renderer {
    /// Create a renderer drawing into `surface`
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        atlas: GlyphAtlas,
        capsule: (&[MeshVertex], &[u32]),
    ) -> Result<Self> {
        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits,
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface is not supported by the adapter"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let depth = DepthBuffer::new(&device, config.width, config.height);
        let mesh_renderer = MeshRenderer::new(&device, surface_format, capsule.0, capsule.1);
        let text_renderer = TextRenderer::new(&device, &queue, surface_format, atlas);

        info!(
            "Renderer initialized with {}x{} resolution",
            config.width, config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            mesh_renderer,
            text_renderer,
            terrain_revision: None,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth = DepthBuffer::new(&self.device, width, height);
            info!("Renderer resized to {}x{}", width, height);
        }
    }

    /// Render a frame. Lost or outdated surfaces are reconfigured and the
    /// frame is skipped.
    pub fn render(&mut self, frame: &Frame) -> Result<()> {
        if self.terrain_revision != Some(frame.terrain_revision) {
            self.mesh_renderer
                .upload_terrain(&self.device, &self.queue, frame.terrain);
            self.terrain_revision = Some(frame.terrain_revision);
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.mesh_renderer
            .prepare(&self.queue, frame.view_proj, frame.player);
        let screen = Vec2::new(self.config.width as f32, self.config.height as f32);
        self.text_renderer
            .prepare(&self.device, &self.queue, screen, &frame.hud);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.mesh_renderer.render(&mut render_pass);
            self.text_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get the surface format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
