//! # Camera
//!
//! First-person fly camera. The camera walks on the ground (`X`-`Y`) plane and looks
//! around with a yaw angle `theta` (around the vertical `Z` axis) and a pitch angle `phi`
//! (elevation above the ground plane). Both angles are kept in degrees.
//!
//! ## Invariants
//!
//! - `theta` is always in `[0, 360)`.
//! - `phi` is always in `[-89, 89]`, so the look direction never becomes parallel to the
//!   world up axis.
//! - The forward vector is derived from `(theta, phi)` on demand and never cached.
//!
//! Every frame the view matrix is broadcast to all programs in use (see
//! [`Camera::broadcast_view`]) so that both lit and flat geometry see the same camera.

use nalgebra_glm as glm;

use crate::shader::ShaderProgram;
use crate::transform;
use crate::uniform_buffer::Uniform;

/// Maximum absolute pitch in degrees.
pub const PITCH_LIMIT: f32 = 89.0;

/// Walk direction offsets, in degrees relative to the current yaw.
pub mod heading {
    pub const FORWARD: f32 = 0.0;
    pub const LEFT: f32 = 90.0;
    pub const BACKWARD: f32 = 180.0;
    pub const RIGHT: f32 = -90.0;
}

/// First-person fly camera: a position plus yaw (`theta`) and pitch (`phi`) in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: glm::Vec3,
    theta: f32,
    phi: f32,
}

impl Camera {
    /// The fixed world up direction.
    pub fn world_up() -> glm::Vec3 {
        glm::Vec3::z()
    }

    /// Creates a camera at `position` looking along `+X`.
    pub fn new(position: glm::Vec3) -> Self {
        Self {
            position,
            theta: 0.0,
            phi: 0.0,
        }
    }

    pub fn position(&self) -> &glm::Vec3 {
        &self.position
    }

    /// Yaw in degrees, `[0, 360)`.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Pitch in degrees, `[-89, 89]`.
    pub fn phi(&self) -> f32 {
        self.phi
    }

    /// Walks `distance` units along `direction_offset` degrees relative to the current yaw.
    ///
    /// Movement stays on the ground plane: the height of the camera never changes. A
    /// negative `distance` walks the opposite way.
    pub fn move_by(&mut self, direction_offset: f32, distance: f32) {
        let walk_direction = (direction_offset + self.theta).rem_euclid(360.0).to_radians();
        self.position.x += distance * walk_direction.cos();
        self.position.y += distance * walk_direction.sin();
    }

    /// Turns the camera by `delta_theta` degrees of yaw and `delta_phi` degrees of pitch.
    pub fn increment_direction(&mut self, delta_theta: f32, delta_phi: f32) {
        self.theta = wrap_degrees(self.theta + delta_theta);
        self.phi = (self.phi + delta_phi).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit look direction: `(cos θ cos φ, sin θ cos φ, sin φ)`.
    pub fn forward(&self) -> glm::Vec3 {
        let (sin_theta, cos_theta) = self.theta.to_radians().sin_cos();
        let (sin_phi, cos_phi) = self.phi.to_radians().sin_cos();
        glm::vec3(cos_theta * cos_phi, sin_theta * cos_phi, sin_phi)
    }

    /// Camera-space right and up axes, both unit length.
    pub fn basis(&self) -> (glm::Vec3, glm::Vec3) {
        let forward = self.forward();
        let right = glm::normalize(&glm::cross(&Self::world_up(), &forward));
        let up = glm::cross(&forward, &right);
        (right, up)
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        let forward = self.forward();
        let (_, up) = self.basis();
        transform::look_at(&self.position, &(self.position + forward), &up)
    }

    /// Pushes the current view matrix to every program in `programs`.
    pub fn broadcast_view(&self, queue: &wgpu::Queue, programs: &[&ShaderProgram]) {
        let view = self.view_matrix();
        for program in programs {
            program.set_matrix(queue, Uniform::View, &view);
        }
    }
}

/// Wraps any finite angle into `[0, 360)`.
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // `rem_euclid` can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec3_close(actual: &glm::Vec3, expected: &glm::Vec3) {
        assert!(
            (actual - expected).norm() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn camera_at(theta: f32, phi: f32) -> Camera {
        let mut camera = Camera::new(glm::vec3(0.0, 0.0, 1.2));
        camera.increment_direction(theta, phi);
        camera
    }

    #[test]
    fn default_camera_looks_along_x() {
        let camera = Camera::new(glm::vec3(0.0, 0.0, 1.2));
        assert_vec3_close(&camera.forward(), &glm::vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn forward_matches_spherical_coordinates_and_is_unit() {
        for theta in (0..360).step_by(15) {
            for phi in (-89..=89).step_by(11) {
                let camera = camera_at(theta as f32, phi as f32);
                let (t, p) = ((theta as f32).to_radians(), (phi as f32).to_radians());
                let expected = glm::vec3(t.cos() * p.cos(), t.sin() * p.cos(), p.sin());

                assert_vec3_close(&camera.forward(), &expected);
                assert!((camera.forward().norm() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn moving_forward_from_origin() {
        let mut camera = Camera::new(glm::vec3(0.0, 0.0, 1.2));
        camera.move_by(heading::FORWARD, 1.0);
        assert_vec3_close(camera.position(), &glm::vec3(1.0, 0.0, 1.2));
    }

    #[test]
    fn strafing_follows_yaw() {
        let mut camera = camera_at(90.0, 0.0);
        camera.move_by(heading::RIGHT, 2.0);
        // Facing +Y, right is +X.
        assert_vec3_close(camera.position(), &glm::vec3(2.0, 0.0, 1.2));

        camera.move_by(heading::LEFT, 2.0);
        camera.move_by(heading::BACKWARD, 1.0);
        assert_vec3_close(camera.position(), &glm::vec3(0.0, -1.0, 1.2));
    }

    #[test]
    fn moving_never_changes_height() {
        for offset in [0.0, 90.0, 180.0, -90.0, 270.0, 33.0, -721.0] {
            for distance in [0.0, 1.0, -2.5, 100.0] {
                let mut camera = camera_at(47.0, 60.0);
                camera.move_by(offset, distance);
                assert_eq!(camera.position().z, 1.2);
            }
        }
    }

    #[test]
    fn zero_distance_is_a_no_op() {
        let mut camera = camera_at(123.0, -10.0);
        let before = *camera.position();
        camera.move_by(heading::FORWARD, 0.0);
        assert_eq!(camera.position(), &before);
    }

    #[test]
    fn negative_distance_walks_backwards() {
        let mut forward = camera_at(30.0, 0.0);
        let mut backward = camera_at(30.0, 0.0);
        forward.move_by(heading::FORWARD, -1.5);
        backward.move_by(heading::BACKWARD, 1.5);
        assert_vec3_close(forward.position(), backward.position());
    }

    #[test]
    fn yaw_wraps_into_range() {
        let mut camera = Camera::new(glm::Vec3::zeros());
        camera.increment_direction(-30.0, 0.0);
        assert!((camera.theta() - 330.0).abs() < EPSILON);

        camera.increment_direction(750.0, 0.0);
        assert!((camera.theta() - 0.0).abs() < 1e-3);

        camera.increment_direction(-1085.0, 0.0);
        assert!((camera.theta() - 355.0).abs() < 1e-3);

        camera.increment_direction(5.0, 0.0);
        assert!((0.0..360.0).contains(&camera.theta()));
    }

    #[test]
    fn yaw_wrap_never_returns_360() {
        assert_eq!(wrap_degrees(-1e-9), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
    }

    #[test]
    fn pitch_is_clamped_inclusive() {
        for (delta, expected) in [
            (-89.0, -89.0),
            (-90.0, -89.0),
            (89.0, 89.0),
            (90.0, 89.0),
            (200.0, 89.0),
            (12.5, 12.5),
        ] {
            let camera = camera_at(0.0, delta);
            assert_eq!(camera.phi(), expected, "delta {delta}");
        }
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = camera_at(200.0, 70.0);
        let (right, up) = camera.basis();
        let forward = camera.forward();

        assert!((right.norm() - 1.0).abs() < EPSILON);
        assert!((up.norm() - 1.0).abs() < EPSILON);
        assert!(right.dot(&forward).abs() < EPSILON);
        assert!(up.dot(&forward).abs() < EPSILON);
        assert!(up.z > 0.0);
        assert!(right.z.abs() < EPSILON);
    }

    #[test]
    fn view_matrix_moves_forward_point_onto_negative_z() {
        let camera = camera_at(75.0, -20.0);
        let ahead = camera.position() + camera.forward() * 3.0;
        let in_view = camera.view_matrix() * glm::vec4(ahead.x, ahead.y, ahead.z, 1.0);

        assert_vec3_close(&in_view.xyz(), &glm::vec3(0.0, 0.0, -3.0));
    }
}
