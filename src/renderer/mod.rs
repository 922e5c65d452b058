pub mod canvas;
pub mod font;
pub mod pipeline;
pub mod tilegrid;
pub mod utils;

use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use canvas::{Canvas, build_batches};
use pipeline::{SpritePipeline, create_sprite_pipeline, orthographic_projection};
use tilegrid::{TileGrid, load_keyed_image};
use utils::letterbox_viewport;

use crate::error::{AssetError, EngineError};
use crate::window::{WindowConfig, track_resize};

// ── Texture handles ──────────────────────────────────────────────────────────

/// Handle to a texture living in the renderer's arena.
///
/// Slots are never reused, so a handle that has been released stays dead:
/// drawing with it is skipped and releasing it again does nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub const fn from_raw(raw: u32) -> Self { Self(raw) }
    pub const fn raw(self) -> u32 { self.0 }
}

struct GpuTexture {
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    // Held so the GPU allocation lives exactly as long as the slot.
    _texture: wgpu::Texture,
}

// ── Renderer ─────────────────────────────────────────────────────────────────

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window_config: WindowConfig,
    pipeline: SpritePipeline,
    /// Logical-resolution projection; never changes after creation.
    projection_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    textures: Vec<Option<GpuTexture>>,
    /// 1×1 white texel used for solid fills.
    white: TextureId,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, window_config: WindowConfig) -> Result<Self, EngineError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(EngineError::SurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_sprite_pipeline(&device, format);

        let proj = orthographic_projection(
            window_config.logical_width as f32,
            window_config.logical_height as f32,
        );
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let mut window_config = window_config;
        track_resize(&mut window_config, size);

        let mut renderer = Self {
            window,
            surface,
            device,
            queue,
            config,
            window_config,
            pipeline,
            projection_bind_group,
            sampler,
            textures: Vec::new(),
            white: TextureId(0),
        };
        renderer.white = renderer.create_texture(&RgbaImage::from_pixel(1, 1, Rgba([255; 4])), "white");
        Ok(renderer)
    }

    // ── Texture arena ──────────────────────────────────────────────────────

    /// Upload `img` and return a handle to it.
    pub fn create_texture(&mut self, img: &RgbaImage, label: &str) -> TextureId {
        let (width, height) = img.dimensions();
        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.pipeline.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Some(GpuTexture { bind_group, width, height, _texture: texture }));
        id
    }

    /// Load a color-keyed image from disk as a single texture.
    pub fn load_image(&mut self, path: &Path) -> Result<TextureId, AssetError> {
        let img = load_keyed_image(path)?;
        log::debug!("loaded image {} ({}x{})", path.display(), img.width(), img.height());
        Ok(self.create_texture(&img, &path.to_string_lossy()))
    }

    /// Load a color-keyed tilesheet and upload it.  With `retain_pixels` the
    /// grid also keeps a CPU copy for [`TileGrid::pixel_at`].
    pub fn load_tile_grid(
        &mut self,
        path: &Path,
        tile_w: u32,
        tile_h: u32,
        retain_pixels: bool,
    ) -> Result<TileGrid, AssetError> {
        if tile_w == 0 || tile_h == 0 {
            return Err(AssetError::TileSize { path: path.to_path_buf(), tile_w, tile_h });
        }
        let img = load_keyed_image(path)?;
        let mut grid = TileGrid::from_image(&img, tile_w, tile_h, retain_pixels);
        let id = self.create_texture(&img, &path.to_string_lossy());
        grid.attach_texture(id);
        log::debug!(
            "loaded tilesheet {} ({}x{} tiles of {tile_w}x{tile_h})",
            path.display(), grid.columns(), grid.rows()
        );
        Ok(grid)
    }

    /// Free the GPU texture behind `id`.  `None`, unknown and already
    /// released handles are ignored, as is the built-in fill texture.
    pub fn release_texture(&mut self, id: Option<TextureId>) {
        let Some(id) = id else { return };
        if id == self.white {
            return;
        }
        if let Some(slot) = self.textures.get_mut(id.0 as usize) {
            slot.take();
        }
    }

    /// Free the texture owned by `grid`; the grid keeps its layout.
    pub fn release_tile_grid(&mut self, grid: &mut TileGrid) {
        let id = grid.detach_texture();
        self.release_texture(id);
    }

    /// Pixel size of a live texture.
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .map(|t| (t.width, t.height))
    }

    // ── Frame ──────────────────────────────────────────────────────────────

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        track_resize(&mut self.window_config, new_size);
    }

    /// Reconfigure the surface at its current size (after `SurfaceError::Lost`).
    pub fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        self.resize(size);
    }

    /// Draw every command queued on `canvas` and present the frame.
    ///
    /// Commands become vertex batches (one per run of same-texture draws) and
    /// are drawn in queue order into the letterboxed logical viewport.
    pub fn render(&mut self, canvas: &Canvas) -> Result<(), wgpu::SurfaceError> {
        let textures = &self.textures;
        let (vertices, batches) = build_batches(canvas.commands(), |id| {
            textures
                .get(id.raw() as usize)
                .and_then(Option::as_ref)
                .map(|t| (t.width, t.height))
        });

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        let [r, g, b, a] = canvas.clear_color().0;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = letterbox_viewport(&self.window_config);
            if !vertices.is_empty() && !vp.is_empty() {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite_vertex_buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));

                for batch in &batches {
                    let texture = batch.texture.unwrap_or(self.white);
                    let Some(gpu) = self.textures.get(texture.0 as usize).and_then(Option::as_ref) else {
                        continue;
                    };
                    pass.set_bind_group(1, &gpu.bind_group, &[]);
                    pass.draw(batch.vertices.clone(), 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
