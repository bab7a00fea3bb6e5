//! # Rotating Cube
//!
//! The textured, lit centerpiece of the scene: a unit cube sitting at a fixed position and
//! spinning about the vertical axis at a constant 20°/s.

use nalgebra_glm as glm;

use crate::geometry::{GeometryBuffer, TEXTURED_CUBE};
use crate::shader::ShaderProgram;
use crate::texture::Texture;
use crate::transform;
use crate::uniform_buffer::Uniform;

/// Spin rate in degrees per second.
pub const ROTATION_RATE: f64 = 20.0;

/// Rotation angle in degrees after `elapsed_ms` milliseconds, in `[0, 360)`.
///
/// The angle has a period of 18 seconds.
pub fn rotation_angle(elapsed_ms: u64) -> f32 {
    (ROTATION_RATE * elapsed_ms as f64 / 1000.0).rem_euclid(360.0) as f32
}

/// Model matrix of a cube at `position` rotated `angle` degrees about `Z`.
pub fn model_matrix(position: &glm::Vec3, angle: f32) -> glm::Mat4 {
    transform::compose_model(position, &transform::rotation_about_z(angle))
}

/// The textured cube spinning about the world `Z` axis at a fixed position.
pub struct RotatingCube {
    position: glm::Vec3,
    angle: f32,
    geometry: GeometryBuffer,
    texture: Texture,
}

impl RotatingCube {
    pub fn new(device: &wgpu::Device, texture: Texture, position: glm::Vec3) -> Self {
        let geometry = GeometryBuffer::new(device, "Cube Vertex Buffer", &TEXTURED_CUBE);
        Self {
            position,
            angle: 0.0,
            geometry,
            texture,
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances the rotation to `elapsed_ms` and pushes the model matrix to `program`.
    pub fn update(&mut self, queue: &wgpu::Queue, program: &ShaderProgram, elapsed_ms: u64) {
        self.angle = rotation_angle(elapsed_ms);
        program.set_matrix(queue, Uniform::Model, &model_matrix(&self.position, self.angle));
    }

    /// Draws the cube with `program`, which must be the lit program built against this
    /// cube's texture layout.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, program: &ShaderProgram) {
        program.bind(render_pass);
        self.texture.bind(render_pass, 1);
        self.geometry.draw(render_pass);
    }

    /// Releases the vertex buffer, then the texture.
    pub fn destroy(&self) {
        self.geometry.destroy();
        self.texture.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_starts_at_zero() {
        assert_eq!(rotation_angle(0), 0.0);
    }

    #[test]
    fn rotation_advances_twenty_degrees_per_second() {
        assert!((rotation_angle(1000) - 20.0).abs() < 1e-4);
        assert!((rotation_angle(4500) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_repeats_every_eighteen_seconds() {
        for t in [0, 1, 250, 9_000, 17_999, 123_456, 86_400_000] {
            let difference = (rotation_angle(t) - rotation_angle(t + 18_000)).abs();
            assert!(difference < 1e-3 || (360.0 - difference) < 1e-3, "t = {t}");
        }
    }

    #[test]
    fn rotation_stays_in_range() {
        for t in (0..100_000).step_by(777) {
            assert!((0.0..360.0).contains(&rotation_angle(t)));
        }
    }

    #[test]
    fn model_matrix_keeps_cube_center_fixed() {
        let position = glm::vec3(1.0, 1.0, 0.5);
        for angle in [0.0, 45.0, 200.0] {
            let center = model_matrix(&position, angle) * glm::vec4(0.0, 0.0, 0.0, 1.0);
            assert!((center.xyz() - position).norm() < 1e-6);
        }
    }

    #[test]
    fn model_matrix_spins_about_vertical_axis_only() {
        let model = model_matrix(&glm::vec3(1.0, 1.0, 0.5), 90.0);
        let corner = model * glm::vec4(0.5, 0.5, 0.5, 1.0);
        // (0.5, 0.5) rotated 90° is (-0.5, 0.5); height is untouched.
        assert!((corner.xyz() - glm::vec3(0.5, 1.5, 1.0)).norm() < 1e-5);
    }
}
