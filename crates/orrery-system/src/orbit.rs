//! Circular parametric orbits in the ecliptic plane.

use glam::Vec3;

use crate::body::BodyId;

/// A circular orbit: `offset = radius * (cos angle, 0, sin angle)` relative
/// to the parent's current center. Deliberately not Keplerian; the viewer
/// wants legible motion, not ephemerides.
#[derive(Debug, Clone)]
pub struct Orbit {
    /// The body being orbited.
    pub parent: BodyId,
    /// Orbit radius in scene length units.
    pub radius: f32,
    /// Angular speed in radians per second.
    pub angular_speed: f32,
    /// Current angle in radians.
    pub angle: f32,
}

impl Orbit {
    /// An orbit starting at `angle = 0` (on the +X axis from the parent).
    #[must_use]
    pub fn circular(parent: BodyId, radius: f32, angular_speed: f32) -> Self {
        Self {
            parent,
            radius,
            angular_speed,
            angle: 0.0,
        }
    }

    /// Same, with an initial phase so bodies don't all line up at spawn.
    #[must_use]
    pub fn with_phase(parent: BodyId, radius: f32, angular_speed: f32, phase: f32) -> Self {
        Self {
            parent,
            radius,
            angular_speed,
            angle: phase,
        }
    }

    /// Current positional offset from the parent center.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            0.0,
            self.radius * self.angle.sin(),
        )
    }
}
