//! Frame-coherent mouse state tracker.
//!
//! [`MouseState`] accumulates winit mouse events during a frame and exposes
//! position, per-frame look delta, button states, scroll, and pointer-capture
//! status. While captured, raw `DeviceEvent::MouseMotion` deltas feed the
//! look delta; uncaptured cursor movement only tracks position.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Per-button press/release tracking for a single frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Maps a [`MouseButton`] to an index 0..4.
fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward | MouseButton::Other(_) => 4,
    }
}

/// Frame-coherent mouse state.
///
/// Forward winit events via the `on_*` methods, query with the accessors,
/// and call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    buttons: [ButtonFrame; 5],
    scroll: f32,
    captured: bool,
}

impl MouseState {
    /// Creates a new `MouseState` with all fields zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Only tracks position; look deltas come
    /// exclusively from raw motion while captured, so an uncaptured cursor
    /// never rotates the camera.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Process a `DeviceEvent::MouseMotion` raw delta (used when captured).
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let idx = button_index(button);
        match state {
            ElementState::Pressed => {
                self.buttons[idx].pressed = true;
                self.buttons[idx].just_pressed = true;
            }
            ElementState::Released => {
                self.buttons[idx].pressed = false;
                self.buttons[idx].just_released = true;
            }
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // ~40 pixels per scroll line
                self.scroll += (pos.y / 40.0) as f32;
            }
        }
    }

    /// Set cursor capture state. Pass the window to apply grab/visibility.
    ///
    /// When captured, the cursor is hidden and locked (or confined) to the
    /// window, and raw motion deltas drive the look delta.
    pub fn set_captured(&mut self, window: &winit::window::Window, captured: bool) {
        use winit::window::CursorGrabMode;
        self.set_captured_flag(captured);
        if captured {
            // Prefer Locked; not every platform supports it.
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                let _ = window.set_cursor_grab(CursorGrabMode::Confined);
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    /// Set the captured flag without touching a window (headless or tests).
    pub fn set_captured_flag(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            // A pending delta from the captured session must not leak into
            // the first uncaptured frame.
            self.delta = Vec2::ZERO;
        }
    }

    /// Clears per-frame transients: delta, scroll, just_pressed, just_released.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    /// Current cursor position in window-logical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Look delta accumulated since the last frame clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether a mouse button is currently held.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].pressed
    }

    /// Whether a mouse button was pressed this frame.
    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_pressed
    }

    /// Whether a mouse button was released this frame.
    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_released
    }

    /// Scroll wheel delta accumulated this frame (positive = scroll up).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether the cursor is currently captured for FPS-style look.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
