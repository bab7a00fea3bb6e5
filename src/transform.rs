//! # Transform Utilities
//!
//! Pure matrix helpers shared by the camera and the scene objects. Nothing in this module
//! touches the GPU; every function takes plain `nalgebra-glm` values and returns a new
//! matrix.
//!
//! ## Conventions
//!
//! - Right-handed world space with `+Z` as the vertical axis.
//! - Projection maps depth into wgpu's `[0, 1]` clip range (`_zo` variants of `nalgebra-glm`).
//! - Angles are stored and passed around in **degrees**; the conversion to radians happens
//!   here, at the point where a trigonometric function is evaluated.

use nalgebra_glm as glm;

/// Vertical field of view used for the whole session, in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;

/// Near clipping plane distance.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clipping plane distance.
pub const FAR_PLANE: f32 = 10.0;

/// Builds a symmetric right-handed perspective projection.
///
/// # Parameters
///
/// - `fov_y_degrees`: Vertical field of view in degrees.
/// - `aspect`: Viewport width divided by height.
/// - `near`, `far`: Distances to the clipping planes, both positive.
pub fn perspective_projection(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> glm::Mat4 {
    glm::perspective_rh_zo(aspect, fov_y_degrees.to_radians(), near, far)
}

/// Builds a right-handed view matrix looking from `eye` towards `target`.
///
/// `up` does not need to be normalized or orthogonal to the view direction, only
/// non-parallel to it.
pub fn look_at(eye: &glm::Vec3, target: &glm::Vec3, up: &glm::Vec3) -> glm::Mat4 {
    glm::look_at_rh(eye, target, up)
}

/// Rotation about the vertical (`Z`) axis by `degrees`.
pub fn rotation_about_z(degrees: f32) -> glm::Mat4 {
    glm::rotation(degrees.to_radians(), &glm::Vec3::z())
}

/// Composes a model matrix that rotates first and then translates.
///
/// The rotation is applied to an identity transform and the translation is composed on
/// top of it, so a vertex `v` ends up at `translation + rotation * v` in world space.
pub fn compose_model(translation: &glm::Vec3, rotation: &glm::Mat4) -> glm::Mat4 {
    let model = rotation * glm::Mat4::identity();
    glm::translation(translation) * model
}
