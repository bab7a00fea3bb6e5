//! # Errors
//!
//! Every failure this crate can report happens during setup: a shader file that cannot be
//! read, a WGSL module that fails validation, a texture that cannot be decoded, or a GPU
//! adapter/device/surface that cannot be acquired. Setup is all-or-nothing, so each variant
//! carries enough context (usually the offending path) for the binary to print a useful
//! diagnostic before exiting.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A shader stage source file could not be read.
    #[error("failed to read shader source {path:?}: {source}")]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A shader stage was rejected by wgpu's validation. `log` holds the compiler output.
    #[error("shader {path:?} failed to compile:\n{log}")]
    ShaderCompile { path: PathBuf, log: String },

    /// A render pipeline could not be assembled from otherwise valid shader modules.
    #[error("failed to build render pipeline `{label}`:\n{log}")]
    Pipeline { label: String, log: String },

    /// The texture image is missing or in a format the `image` crate cannot decode.
    #[error("failed to load texture {path:?}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    Adapter,

    /// The adapter reported no format, present mode or alpha mode for the window surface.
    #[error("the GPU adapter cannot present to this window")]
    SurfaceUnsupported,

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_source_error_names_the_path() {
        let error = Error::ShaderSource {
            path: PathBuf::from("shaders/missing.wgsl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(message.contains("shaders/missing.wgsl"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn shader_compile_error_includes_log() {
        let error = Error::ShaderCompile {
            path: PathBuf::from("lit_fragment.wgsl"),
            log: "expected `;`".to_string(),
        };
        assert!(error.to_string().contains("expected `;`"));
    }
}
