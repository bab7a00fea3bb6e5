//! # GPU Context
//!
//! [`Gpu`] holds the window surface, the device and its queue. [`Gpu::new_async`] acquires
//! all of them for a window and reports every failed step through [`crate::Error`], so a
//! machine without a usable GPU gets a readable message instead of a panic.
//!
//! ```ignore
//! let gpu = pollster::block_on(Gpu::new_async(window.clone(), 640, 480))?;
//! let depth = gpu.create_depth_texture(640, 480);
//! ```

use crate::error::{Error, Result};
use crate::renderer::Renderer;

/// Picks the color format for the window surface.
///
/// egui paints in linear space and expects a non-sRGB target, so the first non-sRGB format
/// wins; otherwise the adapter's preferred format is used.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Builds the surface configuration for a `width × height` window from the adapter's
/// reported capabilities. Zero sizes are raised to 1.
pub fn surface_configuration(
    capabilities: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(&capabilities.formats).ok_or(Error::SurfaceUnsupported)?;
    let present_mode = *capabilities.present_modes.first().ok_or(Error::SurfaceUnsupported)?;
    let alpha_mode = *capabilities.alpha_modes.first().ok_or(Error::SurfaceUnsupported)?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

pub struct Gpu {
    /// Presents finished frames to the window.
    pub surface: wgpu::Surface<'static>,

    pub device: wgpu::Device,

    pub queue: wgpu::Queue,

    /// `width` and `height` follow the window's inner size.
    pub surface_config: wgpu::SurfaceConfiguration,

    pub surface_format: wgpu::TextureFormat,
}

impl Gpu {
    /// Creates the surface for `window` and acquires an adapter and device able to present
    /// to it.
    pub async fn new_async(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(Error::Adapter)?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("lit-cube device"),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let surface_config =
            surface_configuration(&surface.get_capabilities(&adapter), width, height)?;
        log::debug!(
            "Surface {}x{} {:?}, {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface_format: surface_config.format,
            surface,
            device,
            queue,
            surface_config,
        })
    }

    /// Reconfigures the surface for a new window size. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    /// Re-applies the current configuration, used after the surface is lost or outdated.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Creates a depth buffer in [`Renderer::DEPTH_FORMAT`] matching the given size.
    pub fn create_depth_texture(&self, width: u32, height: u32) -> wgpu::TextureView {
        self.device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("depth buffer"),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Renderer::DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wgpu::TextureFormat;

    fn capabilities(formats: Vec<TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn prefers_a_linear_surface_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_the_preferred_srgb_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn surface_configuration_uses_first_modes_and_clamps_size() {
        let config = surface_configuration(&capabilities(vec![TextureFormat::Bgra8Unorm]), 0, 480)
            .unwrap();
        assert_eq!(config.format, TextureFormat::Bgra8Unorm);
        assert_eq!((config.width, config.height), (1, 480));
        assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(config.alpha_mode, wgpu::CompositeAlphaMode::Opaque);
    }

    #[test]
    fn surface_without_formats_is_unsupported() {
        let error = surface_configuration(&capabilities(vec![]), 640, 480).unwrap_err();
        assert!(matches!(error, Error::SurfaceUnsupported));
    }
}
