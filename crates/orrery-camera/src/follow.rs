//! Focus-follow camera: tracks an orbiting body at a fixed offset.

use glam::Vec3;
use orrery_system::Body;

use crate::camera::Camera;

/// Keeps the camera at a body-relative offset while the body moves along
/// its orbit, always looking at the body center. The offset scales with
/// body radius so a gas giant and a moon both fill a similar view.
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    /// Stand-off distance as a multiple of the body radius.
    pub distance_factor: f32,
    /// Height above the ecliptic as a multiple of the body radius.
    pub height_factor: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            distance_factor: 6.0,
            height_factor: 2.0,
        }
    }
}

impl FollowCamera {
    /// Place and aim the camera for this frame's body position.
    pub fn update(&self, body: &Body, camera: &mut Camera) {
        let offset = Vec3::new(
            0.0,
            body.radius * self.height_factor,
            body.radius * self.distance_factor,
        );
        camera.position = body.center + offset;
        camera.look_at(body.center);
    }
}
