//! Smooth camera transitions: interpolates position, orientation, and FOV
//! between two camera states over a configurable duration with easing.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::camera::Camera;

/// A snapshot of camera state for interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    /// Position in world space.
    pub position: Vec3,
    /// Heading in radians.
    pub yaw: f32,
    /// Elevation in radians.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl CameraSnapshot {
    /// Capture the current state of a camera.
    #[must_use]
    pub fn of(camera: &Camera) -> Self {
        Self {
            position: camera.position,
            yaw: camera.yaw,
            pitch: camera.pitch,
            fov_y: camera.fov_y,
        }
    }

    /// Apply this snapshot to a camera.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.yaw = self.yaw;
        camera.pitch = self.pitch;
        camera.fov_y = self.fov_y;
    }
}

/// Easing curves for camera transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingFunction {
    /// Constant speed, no acceleration.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    #[default]
    EaseOut,
    /// Slow start, fast middle, slow end.
    EaseInOut,
}

impl EasingFunction {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    #[must_use]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Drives a smooth transition from one camera state to another. The owner
/// calls [`advance`](Self::advance) each frame and drops the transition
/// once it reports completion.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    /// The camera state at the start of the transition.
    pub from: CameraSnapshot,
    /// The camera state at the end of the transition.
    pub to: CameraSnapshot,
    /// Total duration in seconds.
    pub duration: f32,
    elapsed: f32,
    /// Easing function to use for interpolation.
    pub easing: EasingFunction,
}

impl CameraTransition {
    /// Create a transition between two states. A non-positive duration is
    /// clamped to one millisecond, which snaps on the first advance.
    #[must_use]
    pub fn new(
        from: CameraSnapshot,
        to: CameraSnapshot,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration: duration.max(1e-3),
            elapsed: 0.0,
            easing,
        }
    }

    /// Instant transition: snaps to the target state on the next advance.
    #[must_use]
    pub fn instant(from: CameraSnapshot, to: CameraSnapshot) -> Self {
        Self::new(from, to, 0.0, EasingFunction::Linear)
    }

    /// Whether the transition has reached its target.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and write the interpolated state into the
    /// camera. Returns `true` once the target state has been applied.
    pub fn advance(&mut self, dt: f32, camera: &mut Camera) -> bool {
        self.elapsed += dt.max(0.0);

        if self.finished() {
            self.to.apply(camera);
            return true;
        }

        let t = self.easing.apply(self.elapsed / self.duration);
        camera.position = self.from.position.lerp(self.to.position, t);
        camera.yaw = lerp_angle(self.from.yaw, self.to.yaw, t);
        camera.pitch = self.from.pitch + (self.to.pitch - self.from.pitch) * t;
        camera.fov_y = self.from.fov_y + (self.to.fov_y - self.from.fov_y) * t;
        false
    }
}

/// Interpolate between two angles along the shortest arc, so a transition
/// from 350° to 10° sweeps 20° instead of unwinding 340°.
fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut diff = (to - from) % TAU;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    from + diff * t
}
