//! The render-facing camera state.

use glam::{Mat4, Quat, Vec3};
use orrery_walk::{CameraRig, DEFAULT_CAMERA_POSITION};

/// World-space camera: position plus yaw/pitch orientation (no roll) and a
/// vertical field of view. Controllers write it; the view matrix is derived
/// on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Heading around world +Y, in radians.
    pub yaw: f32,
    /// Elevation, in radians. Controllers clamp this; the camera itself
    /// stores whatever it is given.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 60.0_f32.to_radians(),
        }
    }
}

impl Camera {
    /// Orientation as a quaternion: yaw about +Y, then pitch about local +X.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// The direction the camera is looking.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// The camera's local right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Point the camera at a world-space target, deriving yaw and pitch.
    /// A target at the camera's own position leaves orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(dir) = (target - self.position).try_normalize() else {
            return;
        };
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = dir.y.asin();
    }

    /// Right-handed view matrix for this camera state.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }
}

impl CameraRig for Camera {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }
}
