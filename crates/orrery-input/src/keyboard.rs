//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] accumulates winit keyboard events during a frame and
//! answers, for any physical key: is it held, was it pressed this frame, was
//! it released this frame. Physical key codes are used throughout so that
//! WASD movement works identically regardless of keyboard layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Minimal description of a key event, decoupled from winit for tests.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat event.
    pub repeat: bool,
}

/// Tracks per-frame keyboard state using physical (scan-code) keys.
///
/// Forward every winit [`KeyEvent`] to [`process_event`](Self::process_event),
/// query with the accessors, and call
/// [`clear_transients`](Self::clear_transients) at the end of each frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`], updating internal state.
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`]. Auto-repeat events are ignored so a held
    /// key registers exactly one press transition.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.held.insert(event.key);
                self.just_pressed.insert(event.key);
            }
            ElementState::Released => {
                self.held.remove(&event.key);
                self.just_released.insert(event.key);
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.held.contains(&key)
    }

    /// Returns `true` only during the frame the key transitioned to pressed.
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Returns `true` only during the frame the key transitioned to released.
    #[must_use]
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.just_released.contains(&key)
    }

    /// Drops all held keys. Used when input focus is lost or a mode with its
    /// own listeners takes over, so no key appears stuck.
    pub fn release_all(&mut self) {
        for key in self.held.drain() {
            self.just_released.insert(key);
        }
    }

    /// Clears the per-frame transition sets. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
