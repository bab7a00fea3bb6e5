//! # Uniform Buffer Module
//!
//! CPU-side mirrors of the uniform blocks declared by the two shader programs, and the
//! [`UniformSlots`] table that records where each named uniform lives inside its block.
//!
//! ## Layout
//!
//! Both structs are `#[repr(C)]` and `Pod`. `vec3` uniforms (`ambient`, `lightPos`,
//! `lightCol`) are stored as `vec4<f32>` so that no implicit WGSL padding is needed; the
//! `w` component is ignored by the shaders.
//!
//! | uniform      | lit offset | flat offset |
//! |--------------|------------|-------------|
//! | `projection` | 0          | 0           |
//! | `view`       | 64         | 64          |
//! | `model`      | 128        | 128         |
//! | `ambient`    | 192        | n/a         |
//! | `lightPos`   | 208        | n/a         |
//! | `lightCol`   | 224        | n/a         |
//!
//! The offsets are computed with `std::mem::offset_of!` once, when a program is built, so
//! no per-frame lookup by name ever happens.

use std::mem::{offset_of, size_of};

/// The uniform block of the lit (textured, diffuse-shaded) program.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitUniforms {
    pub projection: nalgebra_glm::Mat4,
    pub view: nalgebra_glm::Mat4,
    pub model: nalgebra_glm::Mat4,
    pub ambient: nalgebra_glm::Vec4,
    pub light_pos: nalgebra_glm::Vec4,
    pub light_col: nalgebra_glm::Vec4,
}

/// The uniform block of the flat (unlit, per-vertex color) program.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniforms {
    pub projection: nalgebra_glm::Mat4,
    pub view: nalgebra_glm::Mat4,
    pub model: nalgebra_glm::Mat4,
}

/// The named uniforms a program may expose.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Uniform {
    Projection,
    View,
    Model,
    Ambient,
    LightPos,
    LightCol,
}

impl Uniform {
    /// The name the uniform carries in the WGSL sources.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Projection => "projection",
            Uniform::View => "view",
            Uniform::Model => "model",
            Uniform::Ambient => "ambient",
            Uniform::LightPos => "lightPos",
            Uniform::LightCol => "lightCol",
        }
    }
}

/// Byte range of one uniform inside its block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformSlot {
    pub offset: wgpu::BufferAddress,
    pub size: wgpu::BufferAddress,
}

impl UniformSlot {
    const fn new(offset: usize, size: usize) -> Self {
        Self {
            offset: offset as wgpu::BufferAddress,
            size: size as wgpu::BufferAddress,
        }
    }
}

/// Where each uniform of a program lives. Uniforms a program does not declare are `None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformSlots {
    pub projection: UniformSlot,
    pub view: UniformSlot,
    pub model: UniformSlot,
    pub ambient: Option<UniformSlot>,
    pub light_pos: Option<UniformSlot>,
    pub light_col: Option<UniformSlot>,
}

const MAT4: usize = size_of::<nalgebra_glm::Mat4>();
const VEC4: usize = size_of::<nalgebra_glm::Vec4>();

impl UniformSlots {
    pub fn lit() -> Self {
        Self {
            projection: UniformSlot::new(offset_of!(LitUniforms, projection), MAT4),
            view: UniformSlot::new(offset_of!(LitUniforms, view), MAT4),
            model: UniformSlot::new(offset_of!(LitUniforms, model), MAT4),
            ambient: Some(UniformSlot::new(offset_of!(LitUniforms, ambient), VEC4)),
            light_pos: Some(UniformSlot::new(offset_of!(LitUniforms, light_pos), VEC4)),
            light_col: Some(UniformSlot::new(offset_of!(LitUniforms, light_col), VEC4)),
        }
    }

    pub fn flat() -> Self {
        Self {
            projection: UniformSlot::new(offset_of!(FlatUniforms, projection), MAT4),
            view: UniformSlot::new(offset_of!(FlatUniforms, view), MAT4),
            model: UniformSlot::new(offset_of!(FlatUniforms, model), MAT4),
            ambient: None,
            light_pos: None,
            light_col: None,
        }
    }

    pub fn get(&self, uniform: Uniform) -> Option<UniformSlot> {
        match uniform {
            Uniform::Projection => Some(self.projection),
            Uniform::View => Some(self.view),
            Uniform::Model => Some(self.model),
            Uniform::Ambient => self.ambient,
            Uniform::LightPos => self.light_pos,
            Uniform::LightCol => self.light_col,
        }
    }
}
