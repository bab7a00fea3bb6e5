//! # Uniform Binding Module
//!
//! [`UniformBinding`] owns one program's uniform buffer on the GPU together with the bind
//! group that exposes it to the shaders at `@group(0) @binding(0)`.
//!
//! Individual uniforms are updated in place: each write goes through
//! [`UniformBinding::write`], which looks the uniform up in the program's
//! [`UniformSlots`] table and issues a `queue.write_buffer` at that offset. This mirrors
//! the "set one named uniform" style of immediate-mode APIs while keeping the slot table
//! resolved up front.

use crate::uniform_buffer::{Uniform, UniformSlots};

pub struct UniformBinding {
    /// The GPU buffer holding the whole uniform block.
    pub buffer: wgpu::Buffer,

    /// Bind group exposing `buffer` at binding 0.
    pub bind_group: wgpu::BindGroup,

    /// Layout of `bind_group`, needed when creating the pipeline layout.
    pub bind_group_layout: wgpu::BindGroupLayout,

    slots: UniformSlots,
}

impl UniformBinding {
    /// Creates the buffer from `initial` and binds it for both the vertex and fragment
    /// stages.
    pub fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        initial: &T,
        slots: UniformSlots,
    ) -> Self {
        let buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Uniform Buffer")),
                contents: bytemuck::bytes_of(initial),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
                },
                count: None,
            }],
            label: Some(&format!("{label} uniform_bind_group_layout")),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{label} uniform_bind_group")),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
            slots,
        }
    }

    pub fn slots(&self) -> &UniformSlots {
        &self.slots
    }

    /// Writes `value` into the slot of `uniform`.
    ///
    /// A uniform the program does not declare is skipped with a debug log, the same way a
    /// missing uniform location is ignored by immediate-mode APIs. Writing a value whose
    /// size differs from the slot is a programming error and panics in debug builds.
    pub fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, uniform: Uniform, value: &T) {
        let Some(slot) = self.slots.get(uniform) else {
            log::debug!("Program has no `{}` uniform; write skipped", uniform.name());
            return;
        };
        let bytes = bytemuck::bytes_of(value);
        debug_assert_eq!(bytes.len() as wgpu::BufferAddress, slot.size);
        queue.write_buffer(&self.buffer, slot.offset, bytes);
    }
}
