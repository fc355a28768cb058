//! Reference-body motion tracking and surface re-projection.
//!
//! [`SurfaceFrame`] keeps a private "shadow" of each tracked body's
//! previous-frame center. Displacement is recomputed fresh from absolute
//! positions every frame rather than integrated, so a passenger that does
//! nothing else tracks its body's translation with zero accumulated error.

use std::collections::HashMap;

use glam::Vec3;
use orrery_system::{Body, BodyId};

/// Tolerance for the surface-lock invariant, in scene length units.
pub const SURFACE_EPSILON: f32 = 0.01;

/// The projection point coincides with the body center, so the surface
/// normal is undefined. Recoverable: the caller substitutes a fallback
/// normal instead of crashing the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("position coincides with body center; surface normal undefined")]
pub struct DegenerateNormal;

/// Per-body shadow-center side table plus the surface projection math.
///
/// Supports multiple simultaneously tracked bodies, though the locomotion
/// controller only ever walks one at a time.
#[derive(Debug, Clone, Default)]
pub struct SurfaceFrame {
    shadow_centers: HashMap<BodyId, Vec3>,
}

impl SurfaceFrame {
    /// Create an empty frame with no tracked bodies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Displacement of `body` since its last observed center.
    ///
    /// On the first observation of a body there is no prior center, so the
    /// delta is zero and the current center is recorded for next time. On
    /// every call the shadow is refreshed to the current center.
    pub fn follow_delta(&mut self, body: &Body) -> Vec3 {
        let delta = match self.shadow_centers.get(&body.id) {
            Some(previous) => body.center - *previous,
            None => Vec3::ZERO,
        };
        self.shadow_centers.insert(body.id, body.center);
        delta
    }

    /// The recorded previous-frame center for a body, if tracked.
    #[must_use]
    pub fn shadow_center(&self, id: BodyId) -> Option<Vec3> {
        self.shadow_centers.get(&id).copied()
    }

    /// Forget the shadow center for one body, so a later re-entry starts
    /// clean instead of seeing a stale "previous" position.
    pub fn clear(&mut self, id: BodyId) {
        self.shadow_centers.remove(&id);
    }

    /// Forget all tracked bodies.
    pub fn clear_all(&mut self) {
        self.shadow_centers.clear();
    }

    /// Re-pin `position` to exactly `body.radius + target_offset` from the
    /// body center, along the current radial direction.
    ///
    /// Fails with [`DegenerateNormal`] when `position` coincides with the
    /// center; the caller must substitute a fallback direction (see
    /// [`project_with_fallback`](Self::project_with_fallback)).
    pub fn project_to_surface(
        position: Vec3,
        body: &Body,
        target_offset: f32,
    ) -> Result<Vec3, DegenerateNormal> {
        let radial = position - body.center;
        if radial.length_squared() < f32::EPSILON {
            return Err(DegenerateNormal);
        }
        let normal = radial.normalize();
        Ok(body.center + normal * (body.radius + target_offset))
    }

    /// Like [`project_to_surface`](Self::project_to_surface), but recovers
    /// from a degenerate normal by projecting along `fallback` instead.
    /// `fallback` must be non-zero; world +Y is used if it is not.
    #[must_use]
    pub fn project_with_fallback(
        position: Vec3,
        body: &Body,
        target_offset: f32,
        fallback: Vec3,
    ) -> Vec3 {
        match Self::project_to_surface(position, body, target_offset) {
            Ok(corrected) => corrected,
            Err(DegenerateNormal) => {
                let dir = fallback.try_normalize().unwrap_or(Vec3::Y);
                body.center + dir * (body.radius + target_offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_system::{BodyKind, Orbit, SolarSystem};

    fn test_body(center: Vec3, radius: f32) -> (SolarSystem, BodyId) {
        let mut system = SolarSystem::new();
        let sun = system.add_body(Body::fixed("Sun", BodyKind::Star, 1.0, 0.0));
        let id = system.add_body(Body::orbiting(
            "Earth",
            BodyKind::Planet,
            radius,
            Orbit::circular(sun, center.length().max(1.0), 0.0),
            0.0,
        ));
        system.body_mut(id).unwrap().center = center;
        (system, id)
    }

    #[test]
    fn test_first_observation_returns_zero_delta() {
        let (system, id) = test_body(Vec3::new(140.0, 0.0, 0.0), 5.0);
        let mut frame = SurfaceFrame::new();
        let delta = frame.follow_delta(system.body(id).unwrap());
        assert_eq!(delta, Vec3::ZERO);
        assert_eq!(frame.shadow_center(id), Some(Vec3::new(140.0, 0.0, 0.0)));
    }

    #[test]
    fn test_follow_delta_is_exact_displacement() {
        let (mut system, id) = test_body(Vec3::new(140.0, 0.0, 0.0), 5.0);
        let mut frame = SurfaceFrame::new();
        frame.follow_delta(system.body(id).unwrap());

        system.body_mut(id).unwrap().center += Vec3::new(10.0, -3.0, 0.5);
        let delta = frame.follow_delta(system.body(id).unwrap());
        assert!((delta - Vec3::new(10.0, -3.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_no_drift_over_many_frames() {
        let (mut system, id) = test_body(Vec3::ZERO, 5.0);
        let mut frame = SurfaceFrame::new();
        let mut passenger = Vec3::new(0.0, 5.1, 0.0);
        frame.follow_delta(system.body(id).unwrap());

        // March the body along a path; the passenger must land exactly where
        // the accumulated absolute displacement says, not where integration
        // noise puts it.
        for i in 0..1000 {
            let t = i as f32 * 0.01;
            system.body_mut(id).unwrap().center = Vec3::new(t.sin() * 50.0, t, t.cos() * 50.0);
            passenger += frame.follow_delta(system.body(id).unwrap());
        }
        let final_center = system.body(id).unwrap().center;
        assert!((passenger - (final_center + Vec3::new(0.0, 5.1, 0.0))).length() < 1e-3);
    }

    #[test]
    fn test_zero_movement_gives_zero_delta() {
        let (system, id) = test_body(Vec3::new(1.0, 2.0, 3.0), 5.0);
        let mut frame = SurfaceFrame::new();
        frame.follow_delta(system.body(id).unwrap());
        let delta = frame.follow_delta(system.body(id).unwrap());
        assert_eq!(delta, Vec3::ZERO);
    }

    #[test]
    fn test_clear_resets_tracking() {
        let (mut system, id) = test_body(Vec3::ZERO, 5.0);
        let mut frame = SurfaceFrame::new();
        frame.follow_delta(system.body(id).unwrap());
        frame.clear(id);
        assert_eq!(frame.shadow_center(id), None);

        // After clearing, a big jump must not be reported as displacement.
        system.body_mut(id).unwrap().center = Vec3::new(500.0, 0.0, 0.0);
        let delta = frame.follow_delta(system.body(id).unwrap());
        assert_eq!(delta, Vec3::ZERO);
    }

    #[test]
    fn test_multiple_bodies_tracked_independently() {
        let mut system = SolarSystem::new();
        let sun = system.add_body(Body::fixed("Sun", BodyKind::Star, 16.0, 0.0));
        let a = system.add_body(Body::orbiting(
            "A",
            BodyKind::Planet,
            5.0,
            Orbit::circular(sun, 100.0, 0.0),
            0.0,
        ));
        let b = system.add_body(Body::orbiting(
            "B",
            BodyKind::Planet,
            5.0,
            Orbit::circular(sun, 200.0, 0.0),
            0.0,
        ));

        let mut frame = SurfaceFrame::new();
        frame.follow_delta(system.body(a).unwrap());
        frame.follow_delta(system.body(b).unwrap());

        system.body_mut(a).unwrap().center += Vec3::X;
        system.body_mut(b).unwrap().center += Vec3::Z * 2.0;

        assert!((frame.follow_delta(system.body(a).unwrap()) - Vec3::X).length() < 1e-6);
        assert!((frame.follow_delta(system.body(b).unwrap()) - Vec3::Z * 2.0).length() < 1e-6);
    }

    #[test]
    fn test_projection_restores_target_distance() {
        let (system, id) = test_body(Vec3::new(140.0, 0.0, 0.0), 5.0);
        let body = system.body(id).unwrap();
        let wandered = body.center + Vec3::new(3.0, 4.0, 0.0);

        let corrected = SurfaceFrame::project_to_surface(wandered, body, 0.1).unwrap();
        let dist = (corrected - body.center).length();
        assert!((dist - 5.1).abs() < 1e-4);

        // Direction is preserved.
        let dir = (corrected - body.center).normalize();
        assert!((dir - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_projection_at_center_is_degenerate() {
        let (system, id) = test_body(Vec3::new(140.0, 0.0, 0.0), 5.0);
        let body = system.body(id).unwrap();
        let result = SurfaceFrame::project_to_surface(body.center, body, 0.1);
        assert_eq!(result, Err(DegenerateNormal));
    }

    #[test]
    fn test_fallback_projection_is_deterministic() {
        let (system, id) = test_body(Vec3::new(140.0, 0.0, 0.0), 5.0);
        let body = system.body(id).unwrap();

        let corrected =
            SurfaceFrame::project_with_fallback(body.center, body, 0.1, Vec3::new(0.0, 2.0, 0.0));
        assert!((corrected - (body.center + Vec3::Y * 5.1)).length() < 1e-4);

        // Zero fallback degrades to world +Y rather than NaN.
        let corrected = SurfaceFrame::project_with_fallback(body.center, body, 0.1, Vec3::ZERO);
        assert!((corrected - (body.center + Vec3::Y * 5.1)).length() < 1e-4);
    }
}
