//! # Geometry
//!
//! Static mesh data for the two kinds of object in the scene and the [`GeometryBuffer`]
//! that owns their GPU copy.
//!
//! ## Meshes
//!
//! - [`TEXTURED_CUBE`]: a unit cube centered at the origin, 6 faces × 2 triangles, with a
//!   flat outward normal per face and a full `[0, 1]²` texture mapping on every face.
//! - [`colored_box`]: the same triangle list scaled to arbitrary dimensions and painted a
//!   single color, used for the light marker.
//!
//! Vertex data is uploaded once and never modified; only per-object uniforms change from
//! frame to frame.

use wgpu::util::DeviceExt;

use crate::vertex::{ColoredVertex, TexturedVertex};

/// Number of vertices in a cube drawn as a non-indexed triangle list.
pub const CUBE_VERTEX_COUNT: usize = 36;

const fn textured(position: [f32; 3], tex_coord: [f32; 2], normal: [f32; 3]) -> TexturedVertex {
    TexturedVertex {
        position,
        tex_coord,
        normal,
    }
}

/// Unit cube with per-face normals, wound as two triangles per face.
#[rustfmt::skip]
pub const TEXTURED_CUBE: [TexturedVertex; CUBE_VERTEX_COUNT] = [
    // -Z
    textured([-0.5, -0.5, -0.5], [0.0, 0.0], [0.0, 0.0, -1.0]),
    textured([ 0.5, -0.5, -0.5], [1.0, 0.0], [0.0, 0.0, -1.0]),
    textured([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 0.0, -1.0]),
    textured([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 0.0, -1.0]),
    textured([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 0.0, -1.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 0.0], [0.0, 0.0, -1.0]),
    // +Z
    textured([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, 0.0, 1.0]),
    textured([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, 0.0, 1.0]),
    textured([ 0.5,  0.5,  0.5], [1.0, 1.0], [0.0, 0.0, 1.0]),
    textured([ 0.5,  0.5,  0.5], [1.0, 1.0], [0.0, 0.0, 1.0]),
    textured([-0.5,  0.5,  0.5], [0.0, 1.0], [0.0, 0.0, 1.0]),
    textured([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, 0.0, 1.0]),
    // -X
    textured([-0.5,  0.5,  0.5], [1.0, 0.0], [-1.0, 0.0, 0.0]),
    textured([-0.5,  0.5, -0.5], [1.0, 1.0], [-1.0, 0.0, 0.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0], [-1.0, 0.0, 0.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0], [-1.0, 0.0, 0.0]),
    textured([-0.5, -0.5,  0.5], [0.0, 0.0], [-1.0, 0.0, 0.0]),
    textured([-0.5,  0.5,  0.5], [1.0, 0.0], [-1.0, 0.0, 0.0]),
    // +X
    textured([ 0.5,  0.5,  0.5], [1.0, 0.0], [1.0, 0.0, 0.0]),
    textured([ 0.5,  0.5, -0.5], [1.0, 1.0], [1.0, 0.0, 0.0]),
    textured([ 0.5, -0.5, -0.5], [0.0, 1.0], [1.0, 0.0, 0.0]),
    textured([ 0.5, -0.5, -0.5], [0.0, 1.0], [1.0, 0.0, 0.0]),
    textured([ 0.5, -0.5,  0.5], [0.0, 0.0], [1.0, 0.0, 0.0]),
    textured([ 0.5,  0.5,  0.5], [1.0, 0.0], [1.0, 0.0, 0.0]),
    // -Y
    textured([-0.5, -0.5, -0.5], [0.0, 1.0], [0.0, -1.0, 0.0]),
    textured([ 0.5, -0.5, -0.5], [1.0, 1.0], [0.0, -1.0, 0.0]),
    textured([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, -1.0, 0.0]),
    textured([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, -1.0, 0.0]),
    textured([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, -1.0, 0.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0], [0.0, -1.0, 0.0]),
    // +Y
    textured([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 1.0, 0.0]),
    textured([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 1.0, 0.0]),
    textured([ 0.5,  0.5,  0.5], [1.0, 0.0], [0.0, 1.0, 0.0]),
    textured([ 0.5,  0.5,  0.5], [1.0, 0.0], [0.0, 1.0, 0.0]),
    textured([-0.5,  0.5,  0.5], [0.0, 0.0], [0.0, 1.0, 0.0]),
    textured([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 1.0, 0.0]),
];

/// Builds an axis-aligned box of `length × width × height` centered at the origin, every
/// vertex painted `color`.
///
/// The triangle list follows [`TEXTURED_CUBE`] corner for corner, scaled per axis.
pub fn colored_box(
    length: f32,
    width: f32,
    height: f32,
    color: [f32; 3],
) -> [ColoredVertex; CUBE_VERTEX_COUNT] {
    TEXTURED_CUBE.map(|vertex| {
        let [x, y, z] = vertex.position;
        ColoredVertex {
            position: [x * length, y * width, z * height],
            color,
        }
    })
}

/// A static vertex buffer and the number of vertices it holds.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    /// Uploads `vertices` into a new vertex buffer.
    pub fn new<V: bytemuck::Pod>(device: &wgpu::Device, label: &str, vertices: &[V]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Binds the buffer to vertex slot 0 and draws it as a triangle list.
    ///
    /// The pipeline and bind groups must already be set on `render_pass`.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }

    /// Frees the GPU memory backing this buffer. The buffer must not be drawn afterwards.
    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}
