//! # Application Core (`app.rs`)
//!
//! The [`App`] struct is the `winit` [`ApplicationHandler`] that runs the demo. It owns the
//! window, the [`Renderer`], the egui state for the HUD, and the per-frame state the loop
//! mutates: the [`Camera`], the [`InputState`] and the [`FrameClock`].
//!
//! ## Frame loop
//!
//! Every `RedrawRequested` event runs one iteration:
//!
//! 1. Mouse look: the cursor offset from the window center turns the camera, scaled by the
//!    last measured frame time and the configured sensitivity. The cursor is then warped
//!    back to the center. When the platform can only lock the cursor in place, raw device
//!    motion is used instead.
//! 2. Movement: the first held movement key walks the camera on the ground plane.
//! 3. The renderer updates the scene uniforms and draws the frame.
//! 4. The frame clock is ticked; once per second the window title shows the frame rate.
//!
//! ## Exit
//!
//! `Escape` or closing the window ends the event loop. Before the loop returns,
//! [`ApplicationHandler::exiting`] releases the scene's GPU resources in order.
//!
//! ## Errors
//!
//! Setup failures cannot propagate out of a `winit` callback, so they are logged, stored in
//! the `App` and the loop is asked to exit. [`App::into_result`] hands the error back to
//! `main` once `run_app` returns.

use std::sync::Arc;

use nalgebra_glm as glm;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Theme, Window, WindowId},
};

use crate::camera::Camera;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::frame_clock::FrameClock;
use crate::hud::HudStats;
use crate::input::InputState;
use crate::renderer::Renderer;

/// Where the player stands when the demo starts.
pub const START_POSITION: [f32; 3] = [0.0, 0.0, 1.2];

/// The `winit` application: window, renderer and the per-frame input state.
pub struct App {
    config: Config,

    window: Option<Arc<Window>>,

    renderer: Option<Renderer>,

    gui_state: Option<egui_winit::State>,

    /// When the frame loop started; all animation is driven by time since this instant.
    start_time: Option<Instant>,

    camera: Camera,

    input: InputState,

    clock: FrameClock,

    last_fps: Option<u32>,

    hud_visible: bool,

    /// Set once the platform refuses to warp the cursor, to avoid retrying every frame.
    cursor_warp_unsupported: bool,

    last_size: (u32, u32),

    error: Option<Error>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let hud_visible = config.hud;
        Self {
            config,
            window: None,
            renderer: None,
            gui_state: None,
            start_time: None,
            camera: Camera::new(glm::Vec3::from(START_POSITION)),
            input: InputState::new(),
            clock: FrameClock::new(),
            last_fps: None,
            hud_visible,
            cursor_warp_unsupported: false,
            last_size: (0, 0),
            error: None,
        }
    }

    /// Returns the setup error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        Window::default_attributes()
            .with_title("Lit Cube")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false)
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(event_loop.create_window(self.window_attributes())?);

        let inner_size = window.inner_size();
        self.last_size = (inner_size.width, inner_size.height);

        window.set_cursor_visible(false);
        let grab = [CursorGrabMode::Confined, CursorGrabMode::Locked]
            .into_iter()
            .find(|mode| match window.set_cursor_grab(*mode) {
                Ok(()) => true,
                Err(error) => {
                    log::debug!("Cursor grab {mode:?} unavailable: {error}");
                    false
                }
            });
        match grab {
            Some(mode) => log::info!("Cursor grabbed ({mode:?})"),
            None => log::warn!("Could not grab the cursor"),
        }
        self.input.set_locked(grab == Some(CursorGrabMode::Locked));

        let gui_context = egui::Context::default();
        let viewport_id = gui_context.viewport_id();
        let gui_state = egui_winit::State::new(
            gui_context,
            viewport_id,
            &window,
            Some(window.scale_factor() as _),
            Some(Theme::Dark),
            None,
        );

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            inner_size.width,
            inner_size.height,
            &self.config,
        ))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.gui_state = Some(gui_state);
        self.start_time = Some(Instant::now());
        Ok(())
    }

    /// Moves the cursor back to the window center, or notes that the platform cannot.
    fn recenter_cursor(&mut self, window: &Window) {
        let (width, height) = self.last_size;
        let center = PhysicalPosition::new((width / 2) as f64, (height / 2) as f64);

        if self.cursor_warp_unsupported || self.input.is_locked() {
            self.input.recenter(None);
            return;
        }
        match window.set_cursor_position(center) {
            Ok(()) => self.input.recenter(Some(center)),
            Err(error) => {
                log::warn!("Cursor warping unavailable ({error}); using relative cursor motion");
                self.cursor_warp_unsupported = true;
                self.input.recenter(None);
            }
        }
    }

    /// Applies this frame's mouse look and movement to the camera.
    fn handle_input(&mut self) {
        let frame_time = self.clock.frame_time_ms();

        let (delta_theta, delta_phi) =
            self.input.look_increment(frame_time, self.config.sensitivity);
        self.camera.increment_direction(delta_theta, delta_phi);

        if let Some(direction) = self.input.keys().direction_offset() {
            self.camera.move_by(direction, self.config.move_speed * frame_time);
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        if self.input.set_key(key_code, pressed) {
            return;
        }
        if !pressed {
            return;
        }
        match key_code {
            KeyCode::Escape => {
                log::info!("Escape pressed. Exiting...");
                event_loop.exit();
            }
            KeyCode::F1 => self.hud_visible = !self.hud_visible,
            _ => (),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(start_time)) = (self.window.clone(), self.start_time) else {
            return;
        };

        self.handle_input();
        self.recenter_cursor(&window);

        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        let (Some(gui_state), Some(renderer)) = (self.gui_state.as_mut(), self.renderer.as_mut())
        else {
            return;
        };

        let gui_input = gui_state.take_egui_input(&window);
        gui_state.egui_ctx().begin_pass(gui_input);

        if self.hud_visible {
            HudStats::collect(self.last_fps, &self.camera, renderer.scene())
                .show(gui_state.egui_ctx());
        }

        let egui::FullOutput {
            textures_delta,
            shapes,
            pixels_per_point,
            platform_output,
            ..
        } = gui_state.egui_ctx().end_pass();

        gui_state.handle_platform_output(&window, platform_output);

        let paint_jobs = gui_state.egui_ctx().tessellate(shapes, pixels_per_point);

        let screen_descriptor = {
            let (width, height) = self.last_size;
            egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, height],
                pixels_per_point: window.scale_factor() as f32,
            }
        };

        let frame = renderer.render_frame(
            &self.camera,
            elapsed_ms,
            screen_descriptor,
            paint_jobs,
            textures_delta,
        );
        match frame {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated; reconfiguring");
                renderer.recover_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory. Exiting...");
                event_loop.exit();
            }
            Err(error) => log::warn!("Skipped frame: {error}"),
        }

        if let Some(fps) = self.clock.tick(elapsed_ms) {
            self.last_fps = Some(fps);
            window.set_title(&format!("Running at {fps} fps."));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.create_window(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(gui_state), Some(window)) = (self.gui_state.as_mut(), self.window.clone()) else {
            return;
        };

        if gui_state.on_window_event(&window, &event).consumed {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code, state),
            WindowEvent::CursorMoved { position, .. } => self.input.cursor_moved(position),
            WindowEvent::Focused(false) => self.input.clear_keys(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing renderer surface to: ({width}, {height})");
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
                self.last_size = (width, height);
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }

        window.request_redraw();
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.mouse_motion(delta);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.take() {
            renderer.shutdown();
        }
        self.gui_state = None;
        self.window = None;
    }
}
