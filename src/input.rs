//! # Input
//!
//! Tracks the keyboard and cursor state the frame loop polls once per frame.
//!
//! ## Keyboard
//!
//! Four movement keys (`W`, `A`, `S`, `D`) are tracked as held/released. Only one movement
//! applies per frame: the first held key in the order forward, left, backward, right wins.
//!
//! ## Mouse look
//!
//! The cursor is hidden and warped back to the window center after every frame, so the
//! offset of the cursor from the center is the mouse motion since the last frame. On
//! platforms that refuse to warp the cursor the anchor follows the cursor instead, and the
//! offset becomes the motion between two successive cursor positions.
//!
//! When the cursor is locked in place (the only grab mode some platforms offer) it never
//! reports new positions. Raw device motion is accumulated instead and drained once per
//! frame.

use winit::dpi::PhysicalPosition;
use winit::keyboard::KeyCode;

use crate::camera::heading;

/// Degrees of camera rotation per pixel of cursor motion per millisecond of frame time.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.05;

/// The movement keys currently held down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub left: bool,
    pub backward: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Walk direction offset in degrees for the highest-priority held key.
    pub fn direction_offset(&self) -> Option<f32> {
        if self.forward {
            Some(heading::FORWARD)
        } else if self.left {
            Some(heading::LEFT)
        } else if self.backward {
            Some(heading::BACKWARD)
        } else if self.right {
            Some(heading::RIGHT)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputState {
    keys: MovementKeys,
    cursor: Option<PhysicalPosition<f64>>,
    anchor: Option<PhysicalPosition<f64>>,

    /// Read raw device motion instead of cursor positions.
    locked: bool,

    /// Raw motion accumulated since the last recenter.
    motion: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &MovementKeys {
        &self.keys
    }

    /// Updates the held state of `key`. Returns `false` for keys that are not movement keys.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::KeyW => &mut self.keys.forward,
            KeyCode::KeyA => &mut self.keys.left,
            KeyCode::KeyS => &mut self.keys.backward,
            KeyCode::KeyD => &mut self.keys.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn clear_keys(&mut self) {
        self.keys = MovementKeys::default();
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
    }

    /// Switches mouse look to raw device motion, for a cursor locked in place.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.motion = (0.0, 0.0);
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Adds raw device motion in pixels. Ignored unless the cursor is locked.
    pub fn mouse_motion(&mut self, (dx, dy): (f64, f64)) {
        if self.locked {
            self.motion.0 += dx;
            self.motion.1 += dy;
        }
    }

    /// Camera increments `(delta_theta, delta_phi)` in degrees for this frame.
    ///
    /// Moving the cursor left or up yields positive increments (turn left, look up).
    pub fn look_increment(&self, frame_time_ms: f32, sensitivity: f32) -> (f32, f32) {
        let (dx, dy) = if self.locked {
            self.motion
        } else {
            let (Some(cursor), Some(anchor)) = (self.cursor, self.anchor) else {
                return (0.0, 0.0);
            };
            (cursor.x - anchor.x, cursor.y - anchor.y)
        };
        let scale = frame_time_ms * sensitivity;
        (-scale * dx as f32, -scale * dy as f32)
    }

    /// Records where the cursor rests for the next frame.
    ///
    /// `warped_to` is the position the cursor was moved to, or `None` when the platform
    /// could not move it.
    pub fn recenter(&mut self, warped_to: Option<PhysicalPosition<f64>>) {
        self.motion = (0.0, 0.0);
        match warped_to {
            Some(position) => {
                self.anchor = Some(position);
                self.cursor = Some(position);
            }
            None => self.anchor = self.cursor,
        }
    }
}
