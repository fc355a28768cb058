//! Body and spacecraft types.

use glam::Vec3;

use crate::orbit::Orbit;

/// Opaque identity of a body within a [`SolarSystem`](crate::SolarSystem).
///
/// Holders of a `BodyId` do not own the body; they look it up each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    /// The raw index value, for display/debugging.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// What kind of body this is. Only used for display and catalog filtering;
/// the locomotion core treats every body as a plain sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// The central star.
    Star,
    /// A planet orbiting the star.
    Planet,
    /// A moon orbiting a planet.
    Moon,
}

/// A spherical body with a moving center and fixed radius.
///
/// The center is world-space and is rewritten every frame by the orbital
/// animation. External consumers read it; only the owning system writes it.
#[derive(Debug, Clone)]
pub struct Body {
    /// Identity within the owning system.
    pub id: BodyId,
    /// Display name (e.g., "Earth").
    pub name: String,
    /// Body classification.
    pub kind: BodyKind,
    /// Sphere radius in scene length units.
    pub radius: f32,
    /// Current world-space center.
    pub center: Vec3,
    /// Circular orbit around a parent, or `None` for the star.
    pub orbit: Option<Orbit>,
    /// Axial rotation speed in radians per second.
    pub spin_speed: f32,
    /// Current axial rotation angle in radians.
    pub spin_angle: f32,
}

impl Body {
    /// A non-orbiting body fixed at the origin (the star).
    #[must_use]
    pub fn fixed(name: &str, kind: BodyKind, radius: f32, spin_speed: f32) -> Self {
        Self {
            id: BodyId(0),
            name: name.to_string(),
            kind,
            radius,
            center: Vec3::ZERO,
            orbit: None,
            spin_speed,
            spin_angle: 0.0,
        }
    }

    /// A body on a circular orbit around `parent`.
    #[must_use]
    pub fn orbiting(
        name: &str,
        kind: BodyKind,
        radius: f32,
        orbit: Orbit,
        spin_speed: f32,
    ) -> Self {
        let center = orbit.offset();
        Self {
            id: BodyId(0),
            name: name.to_string(),
            kind,
            radius,
            center,
            orbit: Some(orbit),
            spin_speed,
            spin_angle: 0.0,
        }
    }
}

/// A named spacecraft on a circular orbit around a body. Too small to walk
/// on; exists for the scene and HUD.
#[derive(Debug, Clone)]
pub struct Satellite {
    /// Display name (e.g., "Hubble Space Telescope").
    pub name: String,
    /// Orbit around the parent body.
    pub orbit: Orbit,
    /// Current world-space position.
    pub position: Vec3,
}

impl Satellite {
    /// Create a spacecraft; its position is derived on the first `advance`.
    #[must_use]
    pub fn new(name: &str, orbit: Orbit) -> Self {
        let position = orbit.offset();
        Self {
            name: name.to_string(),
            orbit,
            position,
        }
    }
}
