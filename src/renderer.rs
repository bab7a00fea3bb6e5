//! # Renderer
//!
//! The `renderer` module drives one frame on the GPU: it updates the scene's uniforms,
//! records a render pass that draws the scene and the egui overlay into the surface
//! texture, submits it, and presents.
//!
//! ## Responsibilities
//!
//! - Own the [`Gpu`], the depth buffer, the egui renderer and the [`Scene`].
//! - Keep the depth buffer in sync with the surface size ([`Renderer::resize`]).
//! - Clear to a dark grey, draw the cube, the light marker, then the HUD.
//! - Release scene resources in order at shutdown ([`Renderer::shutdown`]).
//!
//! Field order matters: the scene is dropped before the GPU device that created it.

use crate::camera::Camera;
use crate::config::Config;
use crate::error::Result;
use crate::gpu::Gpu;
use crate::scene::Scene;

/// Background color.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Owns the GPU context and the scene, and records one render pass per frame.
pub struct Renderer {
    scene: Scene,

    egui_renderer: egui_wgpu::Renderer,

    depth_texture_view: wgpu::TextureView,

    gpu: Gpu,
}

impl Renderer {
    /// The format used for the depth buffer and every pipeline's depth state.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Sets up the GPU for `window` and builds the scene described by `config`.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        config: &Config,
    ) -> Result<Self> {
        let gpu = Gpu::new_async(window, width, height).await?;

        let depth_texture_view = gpu.create_depth_texture(width, height);

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            Some(Self::DEPTH_FORMAT),
            1,
            false,
        );

        let scene = Scene::new(&gpu.device, &gpu.queue, gpu.surface_format, config).await?;

        Ok(Self {
            scene,
            egui_renderer,
            depth_texture_view,
            gpu,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.depth_texture_view = self.gpu.create_depth_texture(width, height);
    }

    /// Reconfigures a surface reported lost or outdated.
    pub fn recover_surface(&self) {
        self.gpu.reconfigure();
    }

    /// Renders and presents one frame.
    ///
    /// Surface acquisition errors are returned to the caller, which decides whether they are
    /// recoverable.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        elapsed_ms: u64,
        screen_descriptor: egui_wgpu::ScreenDescriptor,
        paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.scene.update(&self.gpu.queue, camera, elapsed_ms);

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let surface_texture = self.gpu.surface.get_current_texture()?;

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    label: wgpu::Label::default(),
                    aspect: wgpu::TextureAspect::default(),
                    format: Some(self.gpu.surface_format),
                    dimension: None,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: 0,
                    array_layer_count: None,
                    usage: None,
                });

        encoder.insert_debug_marker("Render scene");

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.render(&mut render_pass);

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }

    /// Releases the scene's buffers and textures. The renderer must not draw afterwards.
    pub fn shutdown(&self) {
        log::info!("Releasing scene resources");
        self.scene.destroy();
    }
}
