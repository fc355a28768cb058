//! Free-fly camera: unrestricted noclip movement for browsing the system.

use glam::Vec3;
use orrery_input::{Action, ActionState, MouseState};
use tracing::debug;

use crate::camera::Camera;

/// Controller state for the free-fly camera. When inactive its update is a
/// no-op, so the walking mode (or a transition) owns the camera instead.
#[derive(Clone, Debug)]
pub struct FreeFlyCamera {
    /// Whether this controller currently owns the camera.
    pub active: bool,
    /// Movement speed in length units per second. Adjustable at runtime.
    pub speed: f32,
    /// Floor for scroll adjustment.
    pub speed_min: f32,
    /// Ceiling for scroll adjustment.
    pub speed_max: f32,
    /// Speed multiplier per scroll tick (multiplicative scaling).
    pub speed_scroll_factor: f32,
    /// Mouse sensitivity for look rotation, radians per pixel.
    pub mouse_sensitivity: f32,
}

impl Default for FreeFlyCamera {
    fn default() -> Self {
        Self {
            active: false,
            speed: 50.0,
            speed_min: 1.0,
            speed_max: 2000.0,
            speed_scroll_factor: 1.2,
            mouse_sensitivity: 0.002,
        }
    }
}

impl FreeFlyCamera {
    /// Toggle activation. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        debug!(active = self.active, "free-fly camera toggled");
        self.active
    }

    /// Rotate the camera from the captured mouse delta. Pitch is clamped to
    /// ±89° so the view never flips over the pole.
    pub fn look(&self, mouse: &MouseState, camera: &mut Camera) {
        if !self.active || !mouse.is_captured() {
            return;
        }
        let delta = mouse.delta();
        camera.yaw -= delta.x * self.mouse_sensitivity;
        camera.pitch = (camera.pitch - delta.y * self.mouse_sensitivity)
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Move the camera from held movement actions. No collision, no gravity;
    /// jump/sprint double as vertical lift and boost here.
    pub fn fly(&self, actions: &ActionState, dt: f32, camera: &mut Camera) {
        if !self.active {
            return;
        }

        let forward = camera.forward();
        let right = camera.right();

        let mut dir = Vec3::ZERO;
        if actions.is_held(Action::MoveForward) {
            dir += forward;
        }
        if actions.is_held(Action::MoveBack) {
            dir -= forward;
        }
        if actions.is_held(Action::StrafeRight) {
            dir += right;
        }
        if actions.is_held(Action::StrafeLeft) {
            dir -= right;
        }
        if actions.is_held(Action::Jump) {
            dir += Vec3::Y;
        }

        if dir.length_squared() > 1e-6 {
            let boost = if actions.is_held(Action::Sprint) { 3.0 } else { 1.0 };
            camera.position += dir.normalize() * self.speed * boost * dt;
        }
    }

    /// Adjust movement speed from the scroll wheel, clamped to the range.
    pub fn adjust_speed(&mut self, mouse: &MouseState) {
        if !self.active {
            return;
        }
        let scroll = mouse.scroll();
        if scroll > 0.0 {
            self.speed *= self.speed_scroll_factor;
        }
        if scroll < 0.0 {
            self.speed /= self.speed_scroll_factor;
        }
        self.speed = self.speed.clamp(self.speed_min, self.speed_max);
    }
}
