//! Solar system scene model: bodies, parametric orbits, and the seeded catalog.
//!
//! This crate owns every body's world-space center and mutates it once per
//! frame through [`SolarSystem::advance`]. Consumers (camera controllers,
//! the surface locomotion core) only ever read centers and radii.

pub mod body;
pub mod catalog;
pub mod orbit;

pub use body::{Body, BodyId, BodyKind, Satellite};
pub use orbit::Orbit;

use glam::Vec3;
use tracing::debug;

/// The animated solar system: a flat body table plus named spacecraft.
///
/// Bodies are stored parents-before-children so a single forward pass of
/// [`advance`](Self::advance) sees every parent's already-updated center.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    satellites: Vec<Satellite>,
    /// Global multiplier on orbital angular speed.
    pub orbit_speed_scale: f32,
    paused: bool,
}

impl SolarSystem {
    /// Build an empty system. Use [`catalog::sol`] for the seeded one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            satellites: Vec::new(),
            orbit_speed_scale: 1.0,
            paused: false,
        }
    }

    /// Add a body and return its identity. Parents must be added first.
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        body.id = id;
        if let Some(orbit) = &body.orbit {
            debug_assert!(
                (orbit.parent.0 as usize) < self.bodies.len(),
                "orbit parent must be inserted before its child"
            );
        }
        self.bodies.push(body);
        id
    }

    /// Add a spacecraft orbiting an existing body.
    pub fn add_satellite(&mut self, satellite: Satellite) {
        self.satellites.push(satellite);
    }

    /// Look up a body by identity.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    /// Mutable access to a body. Reserved for the scene owner; downstream
    /// consumers of the system only read.
    #[must_use]
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0 as usize)
    }

    /// Look up a body by case-insensitive name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// All bodies, in insertion (parents-first) order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// All spacecraft.
    #[must_use]
    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    /// Pause or resume orbital motion. Spin continues while paused, matching
    /// the viewer's "freeze the orbits, keep the planets turning" toggle.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "orbital motion toggled");
        }
        self.paused = paused;
    }

    /// Whether orbital motion is currently paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance every orbit and spin by `dt` seconds and recompute centers.
    ///
    /// Centers are rederived from absolute orbital angles each frame, so a
    /// body's position never accumulates integration error.
    pub fn advance(&mut self, dt: f32) {
        let orbit_dt = if self.paused {
            0.0
        } else {
            dt * self.orbit_speed_scale
        };

        for i in 0..self.bodies.len() {
            let parent_center = match &self.bodies[i].orbit {
                Some(orbit) => self
                    .body(orbit.parent)
                    .map_or(Vec3::ZERO, |parent| parent.center),
                None => Vec3::ZERO,
            };

            let body = &mut self.bodies[i];
            if let Some(orbit) = &mut body.orbit {
                orbit.angle = wrap_angle(orbit.angle + orbit.angular_speed * orbit_dt);
                body.center = parent_center + orbit.offset();
            }
            body.spin_angle = wrap_angle(body.spin_angle + body.spin_speed * dt);
        }

        for sat in &mut self.satellites {
            let parent_center = self
                .bodies
                .get(sat.orbit.parent.0 as usize)
                .map_or(Vec3::ZERO, |parent| parent.center);
            sat.orbit.angle = wrap_angle(sat.orbit.angle + sat.orbit.angular_speed * orbit_dt);
            sat.position = parent_center + sat.orbit.offset();
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        catalog::sol()
    }
}

/// Keep an angle within (-π, π] so it never grows without bound.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle % TAU;
    if wrapped > PI {
        wrapped - TAU
    } else if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
