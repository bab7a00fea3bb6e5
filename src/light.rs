//! # Orbiting Light
//!
//! A single point light circling the cube in the `Y`-`Z` plane at 80°/s. Its color cycles
//! with the orbit: green follows `|cos|` and blue follows `|sin|` of the orbit angle, while
//! red stays at its initial value.
//!
//! The light is made visible by a small flat-colored marker cube drawn at its position
//! with the flat program. The marker keeps the color the light was created with; only the
//! color fed to the lit program oscillates.

use nalgebra_glm as glm;

use crate::geometry::{colored_box, GeometryBuffer};
use crate::shader::ShaderProgram;
use crate::uniform_buffer::Uniform;

/// Orbit rate in degrees per second.
pub const ORBIT_RATE: f64 = 80.0;

/// Center of the orbit in the `Y`-`Z` plane.
pub const ORBIT_CENTER: (f32, f32) = (1.0, 1.5);

/// Edge length of the marker cube.
pub const MARKER_SIZE: f32 = 0.1;

/// Orbit angle in degrees after `elapsed_ms` milliseconds, in `[0, 360)`.
///
/// The orbit has a period of 4.5 seconds.
pub fn orbit_angle(elapsed_ms: u64) -> f32 {
    (ORBIT_RATE * elapsed_ms as f64 / 1000.0).rem_euclid(360.0) as f32
}

/// Position and color of a light at a given moment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightState {
    pub position: glm::Vec3,
    pub color: glm::Vec3,
}

impl LightState {
    /// Moves the light to its place on the orbit at `elapsed_ms` and cycles its color.
    ///
    /// `position.x` and `color.r` are left untouched.
    pub fn orbit(&mut self, elapsed_ms: u64) {
        let (sin, cos) = orbit_angle(elapsed_ms).to_radians().sin_cos();
        self.position.y = ORBIT_CENTER.0 + cos;
        self.position.z = ORBIT_CENTER.1 + sin;
        self.color.y = cos.abs();
        self.color.z = sin.abs();
    }
}

/// A point light circling the cube, drawn as a small flat-colored box.
pub struct OrbitingLight {
    state: LightState,
    marker: GeometryBuffer,
}

impl OrbitingLight {
    pub fn new(device: &wgpu::Device, color: glm::Vec3, position: glm::Vec3) -> Self {
        let marker = GeometryBuffer::new(
            device,
            "Light Marker Vertex Buffer",
            &colored_box(MARKER_SIZE, MARKER_SIZE, MARKER_SIZE, [color.x, color.y, color.z]),
        );
        Self {
            state: LightState { position, color },
            marker,
        }
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    /// Advances the orbit, pushes `lightPos`/`lightCol` to `lit` and the marker's model
    /// matrix to `flat`.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        lit: &ShaderProgram,
        flat: &ShaderProgram,
        elapsed_ms: u64,
    ) {
        self.state.orbit(elapsed_ms);
        lit.set_vec3(queue, Uniform::LightPos, &self.state.position);
        lit.set_vec3(queue, Uniform::LightCol, &self.state.color);
        flat.set_matrix(queue, Uniform::Model, &glm::translation(&self.state.position));
    }

    /// Draws the marker with `program`, which must be the flat program.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, program: &ShaderProgram) {
        program.bind(render_pass);
        self.marker.draw(render_pass);
    }

    pub fn destroy(&self) {
        self.marker.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn initial() -> LightState {
        LightState {
            position: glm::vec3(1.0, 1.0, 1.5),
            color: glm::vec3(0.2, 0.7, 0.8),
        }
    }

    fn state_at(elapsed_ms: u64) -> LightState {
        let mut state = initial();
        state.orbit(elapsed_ms);
        state
    }

    #[test]
    fn orbit_starts_at_top_of_y_axis() {
        let state = state_at(0);
        assert!((state.position - glm::vec3(1.0, 2.0, 1.5)).norm() < EPSILON);
        assert!((state.color - glm::vec3(0.2, 1.0, 0.0)).norm() < EPSILON);
    }

    #[test]
    fn quarter_orbit_is_pure_blue_channel() {
        let state = state_at(1125);
        assert!(state.color.y.abs() < EPSILON);
        assert!((state.color.z - 1.0).abs() < EPSILON);
        assert!((state.position - glm::vec3(1.0, 1.0, 2.5)).norm() < EPSILON);
    }

    #[test]
    fn orbit_repeats_every_four_and_a_half_seconds() {
        for t in [0, 17, 1125, 3000, 4499, 60_000, 7_777_777] {
            let now = state_at(t);
            let later = state_at(t + 4500);
            assert!((now.position - later.position).norm() < 1e-4, "t = {t}");
            assert!((now.color - later.color).norm() < 1e-4, "t = {t}");
        }
    }

    #[test]
    fn orbit_stays_on_unit_circle_in_yz_plane() {
        for t in (0..4500).step_by(97) {
            let state = state_at(t);
            let dy = state.position.y - ORBIT_CENTER.0;
            let dz = state.position.z - ORBIT_CENTER.1;
            assert!(((dy * dy + dz * dz) - 1.0).abs() < 1e-4);
            assert_eq!(state.position.x, 1.0);
        }
    }

    #[test]
    fn red_channel_is_fixed_and_others_non_negative() {
        for t in (0..4500).step_by(131) {
            let state = state_at(t);
            assert_eq!(state.color.x, 0.2);
            assert!(state.color.y >= 0.0 && state.color.z >= 0.0);
        }
    }

    #[test]
    fn orbit_angle_advances_eighty_degrees_per_second() {
        assert_eq!(orbit_angle(0), 0.0);
        assert!((orbit_angle(1000) - 80.0).abs() < 1e-4);
        assert!((orbit_angle(4500)).abs() < 1e-4);
    }
}
