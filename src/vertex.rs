//! # Vertex Module
//!
//! This module defines the two vertex layouts used by the demo and the helpers that
//! describe them to a wgpu render pipeline.
//!
//! ## Structs
//!
//! - [`TexturedVertex`]: position, texture coordinate and normal. Used by the lit program
//!   to draw the wooden cube.
//! - [`ColoredVertex`]: position and color. Used by the flat program to draw the light
//!   marker.
//!
//! Both structs are `#[repr(C)]` and `Pod`, so slices of them can be handed straight to
//! `bytemuck::cast_slice` when creating a vertex buffer. The attribute locations declared
//! here must match the `@location(n)` inputs of the WGSL vertex stages in `shaders/`.
//!
//! ```ignore
//! let pipeline_buffers = [TexturedVertex::description(&TexturedVertex::vertex_attributes())];
//! ```

/// A vertex carrying a position, a texture coordinate and a surface normal.
///
/// The three attributes are interleaved as 8 consecutive `f32`s, giving a stride of
/// 32 bytes:
///
/// | location | field       | format      | offset |
/// |----------|-------------|-------------|--------|
/// | 0        | `position`  | `Float32x3` | 0      |
/// | 1        | `tex_coord` | `Float32x2` | 12     |
/// | 2        | `normal`    | `Float32x3` | 20     |
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    /// Object-space position.
    pub position: [f32; 3],

    /// Texture coordinate, `(s, t)` in `[0, 1]`.
    pub tex_coord: [f32; 2],

    /// Outward face normal. Not required to be normalized by the layout, but every vertex
    /// produced by this crate uses a unit normal.
    pub normal: [f32; 3],
}

impl TexturedVertex {
    /// Attribute list for [`TexturedVertex`], matching `lit_vertex.wgsl`.
    pub fn vertex_attributes() -> Vec<wgpu::VertexAttribute> {
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x3].to_vec()
    }

    /// Returns the vertex buffer layout for a tightly packed array of [`TexturedVertex`].
    pub fn description(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// A vertex carrying a position and an RGB color, interleaved as 6 `f32`s (24 bytes).
///
/// | location | field      | format      | offset |
/// |----------|------------|-------------|--------|
/// | 0        | `position` | `Float32x3` | 0      |
/// | 1        | `color`    | `Float32x3` | 12     |
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColoredVertex {
    /// Attribute list for [`ColoredVertex`], matching `flat_vertex.wgsl`.
    pub fn vertex_attributes() -> Vec<wgpu::VertexAttribute> {
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3].to_vec()
    }

    pub fn description(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColoredVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textured_vertex_is_eight_floats() {
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 32);

        let attributes = TexturedVertex::vertex_attributes();
        let offsets: Vec<_> = attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
        assert_eq!(TexturedVertex::description(&attributes).array_stride, 32);
    }

    #[test]
    fn colored_vertex_is_six_floats() {
        assert_eq!(std::mem::size_of::<ColoredVertex>(), 24);

        let attributes = ColoredVertex::vertex_attributes();
        let offsets: Vec<_> = attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12]);
        assert_eq!(ColoredVertex::description(&attributes).array_stride, 24);
    }

    #[test]
    fn vertices_cast_to_interleaved_floats() {
        let vertex = TexturedVertex {
            position: [1.0, 2.0, 3.0],
            tex_coord: [0.25, 0.75],
            normal: [0.0, 0.0, -1.0],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.75, 0.0, 0.0, -1.0]);
    }
}
