//! # Lit Cube
//!
//! A small real-time 3D scene rendered with wgpu: a wooden cube spins at the center of the
//! world while a point light orbits it, and a first-person fly camera moves around with the
//! mouse and `W`/`A`/`S`/`D`.
//!
//! ## Modules
//!
//! - [`app`]: The `winit` application handler and the per-frame loop.
//! - [`renderer`]: Records and submits the render pass for one frame.
//! - [`gpu`]: Surface, adapter and device setup.
//! - [`scene`]: Owns the shader programs, the cube and the light.
//! - [`camera`]: Yaw/pitch fly camera and its view matrix.
//! - [`cube`] and [`light`]: The two animated objects.
//! - [`transform`]: Projection, look-at and model matrix helpers.
//! - [`geometry`] and [`vertex`]: Mesh data, vertex layouts and GPU vertex buffers.
//! - [`texture`]: Image loading, mip generation and texture binding.
//! - [`shader`]: Loading and linking the WGSL programs.
//! - [`uniform_buffer`] and [`uniform_binding`]: Uniform block layouts and their GPU buffers.
//! - [`input`] and [`frame_clock`]: Input polling state and frame timing.
//! - [`hud`]: Optional egui statistics overlay.
//! - [`config`] and [`error`]: Command-line options and the error type.
//!
//! ## Coordinate conventions
//!
//! World space is right-handed with `+Z` up. The camera walks on the `X`-`Y` plane. All
//! angles that are stored or passed between modules are in degrees.
//!
//! ## Running
//!
//! ```text
//! cargo run --release -- --hud
//! ```
//!
//! Logging goes through the `log` facade; set `RUST_LOG=debug` for more detail.

pub mod app;
pub mod camera;
pub mod config;
pub mod cube;
pub mod error;
pub mod frame_clock;
pub mod geometry;
pub mod gpu;
pub mod hud;
pub mod input;
pub mod light;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod texture;
pub mod transform;
pub mod uniform_binding;
pub mod uniform_buffer;
pub mod vertex;

pub use crate::app::App;
pub use crate::camera::Camera;
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::frame_clock::FrameClock;
pub use crate::gpu::Gpu;
pub use crate::renderer::Renderer;
pub use crate::scene::Scene;
pub use crate::vertex::{ColoredVertex, TexturedVertex};

/// Runs the demo until the window closes, returning the first fatal setup error.
pub fn run(config: Config) -> Result<()> {
    let event_loop = winit::event_loop::EventLoop::new()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
