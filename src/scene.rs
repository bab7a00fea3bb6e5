//! # Scene
//!
//! The `scene` module owns everything that is drawn: the two shader programs, the rotating
//! textured cube and the orbiting light with its marker.
//!
//! ## Overview
//!
//! A [`Scene`] is built once at startup. Construction loads the texture and both programs
//! and pushes the uniforms that never change during a session: the projection matrix (to
//! both programs) and the ambient light level (to the lit program).
//!
//! Each frame the owner calls, in order:
//!
//! 1. [`Scene::update`] with the camera and the elapsed time. The camera's view matrix is
//!    broadcast to both programs, then the cube and the light recompute their transforms
//!    and push them.
//! 2. [`Scene::render`] inside an open render pass. The cube is drawn first, then the light
//!    marker.
//!
//! ## Shutdown
//!
//! [`Scene::destroy`] releases the GPU resources in a fixed order: cube geometry, cube
//! texture, light geometry. The pipelines go away when the scene is dropped, before the
//! device that created them.

use nalgebra_glm as glm;

use crate::camera::Camera;
use crate::config::Config;
use crate::cube::RotatingCube;
use crate::error::Result;
use crate::light::OrbitingLight;
use crate::shader::{ProgramKind, ShaderProgram};
use crate::texture::Texture;
use crate::transform;
use crate::uniform_buffer::Uniform;

/// Where the cube sits.
pub const CUBE_POSITION: [f32; 3] = [1.0, 1.0, 0.5];

/// Where the light starts its orbit.
pub const LIGHT_POSITION: [f32; 3] = [1.0, 1.0, 1.5];

/// The light's initial color, also the color of its marker.
pub const LIGHT_COLOR: [f32; 3] = [0.2, 0.7, 0.8];

/// Constant background illumination.
pub const AMBIENT: [f32; 3] = [0.1, 0.1, 0.1];

/// Everything drawn each frame: the two programs, the cube and the light.
pub struct Scene {
    cube: RotatingCube,
    light: OrbitingLight,
    lit_program: ShaderProgram,
    flat_program: ShaderProgram,
}

impl Scene {
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        config: &Config,
    ) -> Result<Self> {
        let texture = Texture::from_path(device, queue, &config.texture)?;

        let lit_program = ShaderProgram::new(
            device,
            surface_format,
            &config.shader_dir,
            ProgramKind::Lit,
            &[&texture.bind_group_layout],
        )
        .await?;
        let flat_program = ShaderProgram::new(
            device,
            surface_format,
            &config.shader_dir,
            ProgramKind::Flat,
            &[],
        )
        .await?;

        let projection = transform::perspective_projection(
            transform::FIELD_OF_VIEW_DEGREES,
            config.aspect_ratio(),
            transform::NEAR_PLANE,
            transform::FAR_PLANE,
        );
        lit_program.set_matrix(queue, Uniform::Projection, &projection);
        flat_program.set_matrix(queue, Uniform::Projection, &projection);
        lit_program.set_vec3(queue, Uniform::Ambient, &glm::Vec3::from(AMBIENT));

        let cube = RotatingCube::new(device, texture, glm::Vec3::from(CUBE_POSITION));
        let light = OrbitingLight::new(
            device,
            glm::Vec3::from(LIGHT_COLOR),
            glm::Vec3::from(LIGHT_POSITION),
        );

        Ok(Self {
            cube,
            light,
            lit_program,
            flat_program,
        })
    }

    pub fn light(&self) -> &OrbitingLight {
        &self.light
    }

    pub fn cube(&self) -> &RotatingCube {
        &self.cube
    }

    /// Pushes this frame's view, model and light uniforms.
    pub fn update(&mut self, queue: &wgpu::Queue, camera: &Camera, elapsed_ms: u64) {
        camera.broadcast_view(queue, &[&self.flat_program, &self.lit_program]);
        self.cube.update(queue, &self.lit_program, elapsed_ms);
        self.light
            .update(queue, &self.lit_program, &self.flat_program, elapsed_ms);
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        self.cube.draw(render_pass, &self.lit_program);
        self.light.draw(render_pass, &self.flat_program);
    }

    pub fn destroy(&self) {
        self.cube.destroy();
        self.light.destroy();
    }
}
