//! The locomotion controller's private input snapshot.
//!
//! Adapters at the process boundary (winit event handlers, the demo script)
//! write level-state action flags and transient mouse deltas here; the
//! controller consumes the snapshot once at the top of each `update`, so a
//! single frame always sees consistent input. The core never touches a
//! global event bus, which keeps inputs plain function calls in tests.

use glam::Vec2;
use orrery_input::Action;

/// Pressed-state for each locomotion action plus the per-frame mouse delta.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    forward: bool,
    back: bool,
    strafe_left: bool,
    strafe_right: bool,
    sprint: bool,
    jump: bool,
    mouse_delta: Vec2,
    pointer_captured: bool,
}

impl InputState {
    /// Create a state with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action transition. Actions outside the movement set are
    /// ignored here; mode toggles belong to the host.
    pub fn set_action(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveForward => self.forward = pressed,
            Action::MoveBack => self.back = pressed,
            Action::StrafeLeft => self.strafe_left = pressed,
            Action::StrafeRight => self.strafe_right = pressed,
            Action::Sprint => self.sprint = pressed,
            Action::Jump => self.jump = pressed,
            _ => {}
        }
    }

    /// Accumulate a mouse look delta. Deltas only count while pointer
    /// capture is engaged, mirroring pointer-lock semantics.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        if self.pointer_captured {
            self.mouse_delta += Vec2::new(dx, dy);
        }
    }

    /// Record a capture-state change. Losing capture discards any delta
    /// accumulated this frame.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
        if !captured {
            self.mouse_delta = Vec2::ZERO;
        }
    }

    /// Whether pointer capture is currently engaged.
    #[must_use]
    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Consume the accumulated mouse delta, resetting it for the next frame.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Whether any planar movement action is held.
    #[must_use]
    pub fn any_movement(&self) -> bool {
        self.forward || self.back || self.strafe_left || self.strafe_right
    }

    /// Individual action accessors.
    #[must_use]
    pub fn forward(&self) -> bool {
        self.forward
    }

    #[must_use]
    pub fn back(&self) -> bool {
        self.back
    }

    #[must_use]
    pub fn strafe_left(&self) -> bool {
        self.strafe_left
    }

    #[must_use]
    pub fn strafe_right(&self) -> bool {
        self.strafe_right
    }

    #[must_use]
    pub fn sprint(&self) -> bool {
        self.sprint
    }

    #[must_use]
    pub fn jump(&self) -> bool {
        self.jump
    }

    /// Reset everything to rest. Called on mode enter and exit so stale
    /// input never crosses a session boundary.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_flags_follow_actions() {
        let mut input = InputState::new();
        input.set_action(Action::MoveForward, true);
        input.set_action(Action::Sprint, true);
        assert!(input.forward());
        assert!(input.sprint());
        assert!(input.any_movement());

        input.set_action(Action::MoveForward, false);
        assert!(!input.forward());
        assert!(!input.any_movement());
    }

    #[test]
    fn test_non_movement_actions_ignored() {
        let mut input = InputState::new();
        input.set_action(Action::ToggleSurfaceMode, true);
        input.set_action(Action::TogglePause, true);
        assert!(!input.any_movement());
        assert!(!input.jump());
    }

    #[test]
    fn test_mouse_delta_requires_capture() {
        let mut input = InputState::new();
        input.add_mouse_delta(5.0, 5.0);
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);

        input.set_pointer_captured(true);
        input.add_mouse_delta(3.0, -2.0);
        input.add_mouse_delta(1.0, 1.0);
        assert_eq!(input.take_mouse_delta(), Vec2::new(4.0, -1.0));
        // Consumed: second take sees nothing.
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_losing_capture_discards_pending_delta() {
        let mut input = InputState::new();
        input.set_pointer_captured(true);
        input.add_mouse_delta(10.0, 10.0);
        input.set_pointer_captured(false);
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut input = InputState::new();
        input.set_pointer_captured(true);
        input.set_action(Action::MoveBack, true);
        input.add_mouse_delta(1.0, 1.0);
        input.reset();
        assert!(!input.any_movement());
        assert!(!input.pointer_captured());
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }
}
