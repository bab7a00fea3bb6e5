//! # Texture
//!
//! Loads an image file, generates its mip chain on the CPU, and uploads it as a sampled 2D
//! texture bound at `@group(1)` of the lit program (`imageTexture` + `imageSampler`).
//!
//! Sampling uses repeat wrapping on both axes, nearest-neighbour minification and linear
//! magnification.

use std::path::Path;

use image::RgbaImage;

use crate::error::{Error, Result};

/// Number of mip levels in a full chain for a `width × height` image, down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}

/// Decodes the image at `path` into tightly packed RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|source| Error::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Builds the full mip chain of `base`, starting with a copy of `base` itself.
///
/// Each level halves both dimensions (rounding down, never below 1) using a triangle
/// filter.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base.clone());

    for _ in 1..levels {
        let Some(previous) = chain.last() else { break };
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let next =
            image::imageops::resize(previous, width, height, image::imageops::FilterType::Triangle);
        chain.push(next);
    }

    chain
}

pub struct Texture {
    texture: wgpu::Texture,

    /// Layout of [`Texture::bind_group`]; the lit pipeline layout is built from it.
    pub bind_group_layout: wgpu::BindGroupLayout,

    pub bind_group: wgpu::BindGroup,
}

impl Texture {
    /// Loads `path` and uploads it with a generated mip chain.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let image = load_image(path)?;
        log::info!(
            "Loaded texture {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        let label = path.display().to_string();
        Ok(Self::from_image(device, queue, &image, &label))
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let chain = mip_chain(image);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width()),
                    rows_per_image: Some(mip.height()),
                },
                wgpu::Extent3d {
                    width: mip.width(),
                    height: mip.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("imageSampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group_layout,
            bind_group,
        }
    }

    /// Binds the texture to `group` (texture unit 0 of the lit program is group 1).
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>, group: u32) {
        render_pass.set_bind_group(group, &self.bind_group, &[]);
    }

    /// Frees the GPU memory backing this texture.
    pub fn destroy(&self) {
        self.texture.destroy();
    }
}
