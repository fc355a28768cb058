//! The first-person locomotion controller.
//!
//! A two-state machine (`Inactive`/`Active`) that owns the player state,
//! follows its body's orbital motion via [`SurfaceFrame`], integrates
//! planar input into tangent-space movement, and writes camera and avatar
//! transforms each frame. There is no gravity, jumping, or falling: the
//! player is re-pinned to the surface every frame, so `grounded` is an
//! invariant, not a physics outcome.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use orrery_input::Action;
use orrery_system::{Body, BodyId};
use tracing::{debug, info, trace};

use crate::input_state::InputState;
use crate::surface_frame::{SurfaceFrame, SURFACE_EPSILON};

/// Fallback camera framing applied on exit: far enough back to see the
/// whole system, matching the viewer's overview shot.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 150.0, 600.0);

/// Tuning knobs for surface locomotion.
#[derive(Debug, Clone)]
pub struct WalkTuning {
    /// Walking speed in length units per second.
    pub walk_speed: f32,
    /// Multiplier on walk speed while sprint is held.
    pub sprint_multiplier: f32,
    /// Clearance held between the player anchor and the surface.
    pub surface_offset: f32,
    /// Exponential decay applied to carried velocity on frames with no
    /// movement input, so released keys decelerate rather than stop dead.
    pub friction: f32,
    /// Mouse look sensitivity in radians per pixel.
    pub mouse_sensitivity: f32,
    /// Invert the vertical look axis.
    pub invert_y: bool,
    /// Upper bound on one integration step in seconds. A host `dt` spike
    /// (tab refocus) becomes one bounded step instead of a teleport.
    pub max_step: f32,
}

impl Default for WalkTuning {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_multiplier: 1.5,
            surface_offset: 0.1,
            friction: 0.8,
            mouse_sensitivity: 0.002,
            invert_y: false,
            max_step: 0.1,
        }
    }
}

/// Failure to enter surface mode. The caller may retry with another body;
/// controller state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnterError {
    /// The body has no positive finite radius to stand on.
    #[error("body has no positive finite radius")]
    InvalidBody,
}

/// Structured observability events, published through the optional observer
/// hook instead of unconditional console output.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkEvent {
    /// Surface mode became active on a body.
    Entered {
        /// The body being walked on.
        body: BodyId,
    },
    /// Surface mode ended.
    Exited,
    /// A projection hit the degenerate-normal case and recovered via the
    /// fallback direction.
    DegenerateNormalRecovered,
}

/// Camera collaborator: accepts transform writes every active frame.
pub trait CameraRig {
    /// Move the camera to a world-space position.
    fn set_position(&mut self, position: Vec3);
    /// Orient the camera by yaw/pitch (no roll).
    fn set_orientation(&mut self, yaw: f32, pitch: f32);
}

/// Scene-graph collaborator: hosts the avatar's visual stand-in.
pub trait SceneSink {
    /// Add the avatar proxy to the scene. Called once on enter.
    fn attach_avatar(&mut self, transform: AvatarTransform);
    /// Move the avatar proxy. Called every active frame.
    fn update_avatar(&mut self, transform: AvatarTransform);
    /// Remove the avatar proxy. Called once on exit.
    fn detach_avatar(&mut self);
}

/// Body lookup by identity. A missing body during `update` is a silent
/// skip, since transient nulls are expected during scene teardown.
pub trait BodyProvider {
    /// The body for `id`, if it still exists.
    fn body(&self, id: BodyId) -> Option<&Body>;
}

/// World transform for the avatar proxy: position plus an orientation that
/// stands it perpendicular to the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarTransform {
    /// World-space position.
    pub position: Vec3,
    /// Rotation taking local +Y onto the surface normal.
    pub rotation: Quat,
}

/// Outward-facing player snapshot for UI/HUD consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    /// World-space position.
    pub position: Vec3,
    /// Planar velocity in world space.
    pub velocity: Vec3,
    /// Surface-lock invariant flag; always true while active.
    pub grounded: bool,
    /// Name of the body being walked on.
    pub body_name: String,
}

/// Player state owned exclusively by the controller. Zeroed on
/// construction, populated on enter, cleared on exit; nothing persists
/// across enter/exit cycles.
#[derive(Debug, Clone, Default)]
struct PlayerState {
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
    pitch: f32,
    grounded: bool,
    body: Option<BodyId>,
    body_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inactive,
    Active,
}

/// First-person surface locomotion controller. See the crate docs for the
/// per-frame algorithm.
pub struct LocomotionController {
    tuning: WalkTuning,
    mode: Mode,
    player: PlayerState,
    input: InputState,
    frame: SurfaceFrame,
    /// Last valid surface normal; the fallback when projection degenerates.
    last_normal: Vec3,
    observer: Option<Box<dyn FnMut(&WalkEvent) + Send>>,
}

impl std::fmt::Debug for LocomotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocomotionController")
            .field("mode", &self.mode)
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

impl LocomotionController {
    /// Create an inactive controller with the given tuning.
    #[must_use]
    pub fn new(tuning: WalkTuning) -> Self {
        Self {
            tuning,
            mode: Mode::Inactive,
            player: PlayerState::default(),
            input: InputState::new(),
            frame: SurfaceFrame::new(),
            last_normal: Vec3::Y,
            observer: None,
        }
    }

    /// Install a structured event observer. Replaces any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn FnMut(&WalkEvent) + Send>) {
        self.observer = Some(observer);
    }

    fn emit(&mut self, event: WalkEvent) {
        if let Some(observer) = &mut self.observer {
            observer(&event);
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Enter surface mode on `body`.
    ///
    /// Places the player at `center + up * (radius + surface_offset)`,
    /// verifies the stand-off distance (re-deriving via projection if the
    /// additive construction is off), resets orientation to the local
    /// tangent default, attaches the avatar proxy, and writes the camera.
    ///
    /// Entering while already active exits the previous body first, so the
    /// swap is atomic from the caller's perspective.
    pub fn enter(
        &mut self,
        camera: &mut dyn CameraRig,
        scene: &mut dyn SceneSink,
        body: &Body,
    ) -> Result<(), EnterError> {
        if !(body.radius.is_finite() && body.radius > 0.0) {
            return Err(EnterError::InvalidBody);
        }

        if self.mode == Mode::Active {
            self.exit(camera, scene);
        }

        let target = body.radius + self.tuning.surface_offset;
        let mut position = body.center + Vec3::Y * target;

        // The additive construction should already sit at the target
        // distance; re-derive through the projection if numerics disagree.
        if ((position - body.center).length() - target).abs() > SURFACE_EPSILON {
            position = SurfaceFrame::project_with_fallback(
                position,
                body,
                self.tuning.surface_offset,
                Vec3::Y,
            );
        }

        self.player = PlayerState {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            grounded: true,
            body: Some(body.id),
            body_name: body.name.clone(),
        };
        self.last_normal = Vec3::Y;
        self.input.reset();

        // Seed the shadow center so the first update sees zero displacement.
        self.frame.clear(body.id);
        self.frame.follow_delta(body);

        camera.set_position(position);
        camera.set_orientation(0.0, 0.0);
        scene.attach_avatar(AvatarTransform {
            position,
            rotation: Quat::from_rotation_arc(Vec3::Y, Vec3::Y),
        });

        self.mode = Mode::Active;
        info!(body = %body.name, radius = body.radius, "entered surface mode");
        self.emit(WalkEvent::Entered { body: body.id });
        Ok(())
    }

    /// Leave surface mode. Idempotent: a second call is a no-op.
    ///
    /// Detaches the avatar, clears player and input state, forgets the
    /// body's shadow center, and resets the camera to the fallback framing.
    pub fn exit(&mut self, camera: &mut dyn CameraRig, scene: &mut dyn SceneSink) {
        if self.mode == Mode::Inactive {
            return;
        }

        scene.detach_avatar();
        if let Some(id) = self.player.body {
            self.frame.clear(id);
        }

        let body_name = std::mem::take(&mut self.player.body_name);
        self.player = PlayerState::default();
        self.input.reset();
        self.last_normal = Vec3::Y;

        camera.set_position(DEFAULT_CAMERA_POSITION);
        camera.set_orientation(0.0, 0.0);

        self.mode = Mode::Inactive;
        info!(body = %body_name, "exited surface mode");
        self.emit(WalkEvent::Exited);
    }

    // ── Input adapters ──────────────────────────────────────────────

    /// Record an action transition. Ignored while inactive (the mode's
    /// listeners are "detached").
    pub fn apply_action(&mut self, action: Action, pressed: bool) {
        if self.mode == Mode::Active {
            self.input.set_action(action, pressed);
        }
    }

    /// Record a mouse look delta. Ignored while inactive or uncaptured.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if self.mode == Mode::Active {
            self.input.add_mouse_delta(dx, dy);
        }
    }

    /// Record a pointer capture change.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        if self.mode == Mode::Active {
            self.input.set_pointer_captured(captured);
        }
    }

    // ── Per-frame update ────────────────────────────────────────────

    /// Advance one frame. No-op while inactive or when the body has gone
    /// missing (expected during teardown races); nothing in here is fatal.
    pub fn update(
        &mut self,
        dt: f32,
        bodies: &dyn BodyProvider,
        camera: &mut dyn CameraRig,
        scene: &mut dyn SceneSink,
    ) {
        if self.mode == Mode::Inactive {
            return;
        }
        let Some(id) = self.player.body else {
            return;
        };
        let Some(body) = bodies.body(id) else {
            trace!(body = id.index(), "active body missing; skipping frame");
            return;
        };
        let body = body.clone();

        // A broken frame is worse than a skipped one: bound the step.
        let dt = dt.clamp(0.0, self.tuning.max_step);

        // 1. Follow the body's rigid motion since last frame.
        let follow = self.frame.follow_delta(&body);
        self.player.position += follow;

        // Surface normal for this frame's tangent plane.
        let normal = match (self.player.position - body.center).try_normalize() {
            Some(n) => n,
            None => {
                self.emit(WalkEvent::DegenerateNormalRecovered);
                self.last_normal
            }
        };

        // 2–3. Rebuild planar velocity from held keys; decay the carryover
        // when nothing is held. Yaw only — pitch never tilts movement.
        let yaw_rotation = Quat::from_rotation_y(self.player.yaw);
        let forward = tangent_direction(yaw_rotation * Vec3::NEG_Z, normal);
        let right = tangent_direction(yaw_rotation * Vec3::X, normal);

        let mut wish = Vec3::ZERO;
        if self.input.forward() {
            wish += forward;
        }
        if self.input.back() {
            wish -= forward;
        }
        if self.input.strafe_right() {
            wish += right;
        }
        if self.input.strafe_left() {
            wish -= right;
        }

        if self.input.any_movement() {
            // Diagonal input is deliberately not re-normalized: two held
            // keys sum to a faster resultant, matching the naive policy.
            let speed = if self.input.sprint() {
                self.tuning.walk_speed * self.tuning.sprint_multiplier
            } else {
                self.tuning.walk_speed
            };
            self.player.velocity = wish * speed;
        } else {
            self.player.velocity *= self.tuning.friction;
        }

        // Jump is recognized but produces no impulse: there is no vertical
        // motion model on a re-pinned surface.
        if self.input.jump() {
            trace!("jump held; no vertical impulse in surface mode");
        }

        // 4. No velocity along the surface normal, ever.
        self.player.velocity -= normal * self.player.velocity.dot(normal);

        // 5. Integrate.
        self.player.position += self.player.velocity * dt;

        // 6. Re-pin to the exact stand-off distance.
        self.player.position = SurfaceFrame::project_with_fallback(
            self.player.position,
            &body,
            self.tuning.surface_offset,
            self.last_normal,
        );

        // 7. Mouse look; pitch clamped, yaw wraps naturally.
        let mouse = self.input.take_mouse_delta();
        if self.input.pointer_captured() {
            self.player.yaw -= mouse.x * self.tuning.mouse_sensitivity;
            let dy = if self.tuning.invert_y { -mouse.y } else { mouse.y };
            self.player.pitch = (self.player.pitch - dy * self.tuning.mouse_sensitivity)
                .clamp(-FRAC_PI_2, FRAC_PI_2);
        }

        // 8. Publish transforms. Velocity is re-zeroed against the final
        // normal so observers never see a radial component.
        let final_normal = (self.player.position - body.center)
            .try_normalize()
            .unwrap_or(self.last_normal);
        self.player.velocity -= final_normal * self.player.velocity.dot(final_normal);
        self.player.grounded = true;
        self.last_normal = final_normal;

        camera.set_position(self.player.position);
        camera.set_orientation(self.player.yaw, self.player.pitch);
        scene.update_avatar(AvatarTransform {
            position: self.player.position,
            rotation: Quat::from_rotation_arc(Vec3::Y, final_normal),
        });

        debug!(
            pos = ?self.player.position,
            vel = ?self.player.velocity,
            "surface frame advanced"
        );
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Whether surface mode is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode == Mode::Active
    }

    /// The body being walked on, if any.
    #[must_use]
    pub fn current_body(&self) -> Option<BodyId> {
        self.player.body
    }

    /// HUD snapshot, or `None` while inactive.
    #[must_use]
    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        if self.mode == Mode::Inactive {
            return None;
        }
        Some(PlayerSnapshot {
            position: self.player.position,
            velocity: self.player.velocity,
            grounded: self.player.grounded,
            body_name: self.player.body_name.clone(),
        })
    }
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(WalkTuning::default())
    }
}

/// Project a direction onto the tangent plane of `normal` and normalize.
/// Falls back to the raw direction when it is (nearly) parallel to the
/// normal, which happens when looking straight along the radial axis.
fn tangent_direction(raw: Vec3, normal: Vec3) -> Vec3 {
    let tangent = raw - normal * raw.dot(normal);
    tangent.try_normalize().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_system::{BodyKind, Orbit, SolarSystem};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const EPS: f32 = SURFACE_EPSILON;

    #[derive(Default)]
    struct TestCamera {
        position: Vec3,
        yaw: f32,
        pitch: f32,
        writes: usize,
    }

    impl CameraRig for TestCamera {
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
            self.writes += 1;
        }
        fn set_orientation(&mut self, yaw: f32, pitch: f32) {
            self.yaw = yaw;
            self.pitch = pitch;
        }
    }

    #[derive(Default)]
    struct TestScene {
        attached: bool,
        attach_count: usize,
        detach_count: usize,
        avatar: Option<AvatarTransform>,
    }

    impl SceneSink for TestScene {
        fn attach_avatar(&mut self, transform: AvatarTransform) {
            self.attached = true;
            self.attach_count += 1;
            self.avatar = Some(transform);
        }
        fn update_avatar(&mut self, transform: AvatarTransform) {
            self.avatar = Some(transform);
        }
        fn detach_avatar(&mut self) {
            self.attached = false;
            self.detach_count += 1;
        }
    }

    /// A system with one walkable planet ("Earth", radius 5) at a chosen
    /// center, mirroring the reference scenario.
    fn earth_at(center: Vec3) -> (SolarSystem, BodyId) {
        let mut system = SolarSystem::new();
        let sun = system.add_body(Body::fixed("Sun", BodyKind::Star, 16.0, 0.0));
        let id = system.add_body(Body::orbiting(
            "Earth",
            BodyKind::Planet,
            5.0,
            Orbit::circular(sun, 140.0, 0.0),
            0.0,
        ));
        system.body_mut(id).unwrap().center = center;
        (system, id)
    }

    fn controller() -> LocomotionController {
        LocomotionController::new(WalkTuning {
            max_step: 2.0, // scenario tests use dt = 1.0
            ..WalkTuning::default()
        })
    }

    fn enter_earth(
        ctl: &mut LocomotionController,
        system: &SolarSystem,
        id: BodyId,
        cam: &mut TestCamera,
        scene: &mut TestScene,
    ) {
        ctl.enter(cam, scene, system.body(id).unwrap()).unwrap();
    }

    fn surface_distance(ctl: &LocomotionController, system: &SolarSystem, id: BodyId) -> f32 {
        let snap = ctl.snapshot().unwrap();
        (snap.position - system.body(id).unwrap().center).length()
    }

    // ── enter / exit ────────────────────────────────────────────────

    #[test]
    fn test_enter_places_player_at_standoff_distance() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);

        assert!(ctl.is_active());
        assert_eq!(ctl.current_body(), Some(id));
        assert!((surface_distance(&ctl, &system, id) - 5.1).abs() <= EPS);
        assert!(scene.attached);
        assert_eq!(cam.position, ctl.snapshot().unwrap().position);
    }

    #[test]
    fn test_enter_rejects_degenerate_body() {
        let (mut system, id) = earth_at(Vec3::ZERO);
        system.body_mut(id).unwrap().radius = 0.0;
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        let result = ctl.enter(&mut cam, &mut scene, system.body(id).unwrap());
        assert_eq!(result, Err(EnterError::InvalidBody));
        assert!(!ctl.is_active());
        assert!(!scene.attached);
    }

    #[test]
    fn test_enter_resets_state_from_previous_session() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.set_pointer_captured(true);
        ctl.apply_mouse_delta(500.0, 300.0);
        ctl.apply_action(Action::MoveForward, true);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        ctl.exit(&mut cam, &mut scene);

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let snap = ctl.snapshot().unwrap();
        assert_eq!(snap.velocity, Vec3::ZERO);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn test_exit_is_idempotent() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.exit(&mut cam, &mut scene);
        let detaches_after_first = scene.detach_count;
        ctl.exit(&mut cam, &mut scene);

        assert_eq!(scene.detach_count, detaches_after_first);
        assert!(!ctl.is_active());
        assert_eq!(ctl.snapshot(), None);
        assert_eq!(cam.position, DEFAULT_CAMERA_POSITION);
    }

    #[test]
    fn test_exit_before_enter_is_a_noop() {
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();
        ctl.exit(&mut cam, &mut scene);
        assert_eq!(scene.detach_count, 0);
        assert_eq!(cam.writes, 0);
    }

    #[test]
    fn test_entering_second_body_swaps_cleanly() {
        let (mut system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let sun = system.bodies()[0].id;
        let mars = {
            let mars = Body::orbiting(
                "Mars",
                BodyKind::Planet,
                5.0,
                Orbit::circular(sun, 170.0, 0.0),
                0.0,
            );
            system.add_body(mars)
        };
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.enter(&mut cam, &mut scene, system.body(mars).unwrap())
            .unwrap();

        assert_eq!(ctl.current_body(), Some(mars));
        assert_eq!(scene.attach_count, 2);
        assert_eq!(scene.detach_count, 1);
        assert_eq!(ctl.snapshot().unwrap().body_name, "Mars");
    }

    // ── follow / surface lock ───────────────────────────────────────

    #[test]
    fn test_player_follows_body_translation_exactly() {
        let (mut system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;

        system.body_mut(id).unwrap().center += Vec3::new(10.0, 0.0, 0.0);
        ctl.update(1.0, &system, &mut cam, &mut scene);

        let after = ctl.snapshot().unwrap().position;
        assert!((after - before - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        assert!((surface_distance(&ctl, &system, id) - 5.1).abs() <= EPS);
    }

    #[test]
    fn test_zero_body_motion_keeps_player_still() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;
        for _ in 0..10 {
            ctl.update(0.016, &system, &mut cam, &mut scene);
        }
        let after = ctl.snapshot().unwrap().position;
        assert!((after - before).length() < 1e-5);
    }

    #[test]
    fn test_surface_lock_holds_under_arbitrary_input() {
        let (mut system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.set_pointer_captured(true);

        // Orbit the body, mash keys, and jerk the mouse for 500 frames.
        for i in 0..500 {
            let t = i as f32 * 0.016;
            system.body_mut(id).unwrap().center =
                Vec3::new(140.0 * t.cos(), 0.0, 140.0 * t.sin());
            ctl.apply_action(Action::MoveForward, i % 3 != 0);
            ctl.apply_action(Action::StrafeLeft, i % 5 == 0);
            ctl.apply_action(Action::Sprint, i % 7 == 0);
            ctl.apply_action(Action::Jump, i % 2 == 0);
            ctl.apply_mouse_delta((i % 11) as f32 - 5.0, (i % 13) as f32 - 6.0);
            ctl.update(0.016, &system, &mut cam, &mut scene);

            let dist = surface_distance(&ctl, &system, id);
            assert!(
                (dist - 5.1).abs() <= EPS,
                "surface lock violated at frame {i}: {dist}"
            );
        }
    }

    #[test]
    fn test_normal_velocity_component_is_zero_after_update() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.apply_action(Action::MoveForward, true);
        ctl.apply_action(Action::Jump, true);

        for _ in 0..50 {
            ctl.update(0.016, &system, &mut cam, &mut scene);
            let snap = ctl.snapshot().unwrap();
            let normal = (snap.position - system.body(id).unwrap().center).normalize();
            assert!(snap.velocity.dot(normal).abs() < 1e-4);
            assert!(snap.grounded);
        }
    }

    // ── movement ────────────────────────────────────────────────────

    #[test]
    fn test_forward_walk_scenario() {
        // Reference scenario: Earth radius 5, offset 0.1, walk speed 5.
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;

        ctl.apply_action(Action::MoveForward, true);
        ctl.update(1.0, &system, &mut cam, &mut scene);

        let after = ctl.snapshot().unwrap().position;
        let moved = after - before;

        // ~5 units of tangent travel before re-clamping bends it around
        // the sphere; the chord is shorter but the direction must match.
        assert!(moved.length() > 3.0, "moved {}", moved.length());
        let facing = Vec3::NEG_Z; // default yaw looks along -Z at the +Y pole
        assert!(moved.normalize().dot(facing) > 0.7);
        assert!((surface_distance(&ctl, &system, id) - 5.1).abs() <= EPS);
    }

    #[test]
    fn test_small_step_moves_at_walk_speed() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;

        ctl.apply_action(Action::MoveForward, true);
        ctl.update(0.01, &system, &mut cam, &mut scene);

        let moved = (ctl.snapshot().unwrap().position - before).length();
        // Curvature is negligible over 5 cm of travel on a radius-5 sphere.
        assert!((moved - 0.05).abs() < 5e-3, "moved {moved}");
    }

    #[test]
    fn test_sprint_multiplies_speed() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());

        let mut walk = controller();
        enter_earth(&mut walk, &system, id, &mut cam, &mut scene);
        walk.apply_action(Action::MoveForward, true);
        let start = walk.snapshot().unwrap().position;
        walk.update(0.01, &system, &mut cam, &mut scene);
        let walk_dist = (walk.snapshot().unwrap().position - start).length();

        let mut sprint = controller();
        enter_earth(&mut sprint, &system, id, &mut cam, &mut scene);
        sprint.apply_action(Action::MoveForward, true);
        sprint.apply_action(Action::Sprint, true);
        let start = sprint.snapshot().unwrap().position;
        sprint.update(0.01, &system, &mut cam, &mut scene);
        let sprint_dist = (sprint.snapshot().unwrap().position - start).length();

        assert!((sprint_dist / walk_dist - 1.5).abs() < 0.05);
    }

    #[test]
    fn test_diagonal_input_is_not_renormalized() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.apply_action(Action::MoveForward, true);
        ctl.apply_action(Action::StrafeRight, true);
        let start = ctl.snapshot().unwrap().position;
        ctl.update(0.01, &system, &mut cam, &mut scene);

        let moved = (ctl.snapshot().unwrap().position - start).length();
        // sqrt(2) × single-key distance, per the naive vector-sum policy.
        assert!((moved - 0.05 * std::f32::consts::SQRT_2).abs() < 5e-3, "moved {moved}");
    }

    #[test]
    fn test_released_keys_decay_instead_of_hard_stop() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.apply_action(Action::MoveForward, true);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        let moving = ctl.snapshot().unwrap().velocity.length();
        assert!(moving > 0.0);

        ctl.apply_action(Action::MoveForward, false);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        let coasting = ctl.snapshot().unwrap().velocity.length();
        assert!(coasting > 0.0, "should coast, not stop dead");
        assert!(coasting < moving, "should decelerate");

        for _ in 0..100 {
            ctl.update(0.016, &system, &mut cam, &mut scene);
        }
        assert!(ctl.snapshot().unwrap().velocity.length() < 1e-3);
    }

    #[test]
    fn test_dt_spike_is_clamped() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = LocomotionController::new(WalkTuning {
            max_step: 0.1,
            ..WalkTuning::default()
        });

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;
        ctl.apply_action(Action::MoveForward, true);

        // A 30-second stall (tab refocus) must integrate as one 0.1 s step.
        ctl.update(30.0, &system, &mut cam, &mut scene);
        let moved = (ctl.snapshot().unwrap().position - before).length();
        assert!(moved < 0.6, "dt spike not clamped: moved {moved}");
    }

    // ── orientation ─────────────────────────────────────────────────

    #[test]
    fn test_pitch_clamps_at_half_pi() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.set_pointer_captured(true);

        // Drive pitch far past the limit, downward then upward.
        ctl.apply_mouse_delta(0.0, 1e6);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        assert_eq!(cam.pitch, -FRAC_PI_2);
        assert_eq!(cam.yaw, 0.0, "pitch-only input must not touch yaw");

        ctl.apply_mouse_delta(0.0, -1e7);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        assert_eq!(cam.pitch, FRAC_PI_2);
    }

    #[test]
    fn test_yaw_wraps_without_clamp() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.set_pointer_captured(true);
        ctl.apply_mouse_delta(-1e5, 0.0);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        // 1e5 px * 0.002 rad/px = 200 rad of yaw; no clamp applies.
        assert!(cam.yaw > 100.0);
    }

    #[test]
    fn test_invert_y_flips_pitch_direction() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());

        let mut normal = controller();
        enter_earth(&mut normal, &system, id, &mut cam, &mut scene);
        normal.set_pointer_captured(true);
        normal.apply_mouse_delta(0.0, 100.0);
        normal.update(0.016, &system, &mut cam, &mut scene);
        let normal_pitch = cam.pitch;
        assert!(normal_pitch < 0.0, "mouse down pitches the view down");

        let mut inverted = LocomotionController::new(WalkTuning {
            invert_y: true,
            max_step: 2.0,
            ..WalkTuning::default()
        });
        enter_earth(&mut inverted, &system, id, &mut cam, &mut scene);
        inverted.set_pointer_captured(true);
        inverted.apply_mouse_delta(0.0, 100.0);
        inverted.update(0.016, &system, &mut cam, &mut scene);

        assert!((cam.pitch + normal_pitch).abs() < 1e-6, "same delta, mirrored pitch");
        assert_eq!(cam.yaw, 0.0, "inversion only affects the vertical axis");
    }

    #[test]
    fn test_mouse_ignored_without_pointer_capture() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.apply_mouse_delta(1000.0, 1000.0);
        ctl.update(0.016, &system, &mut cam, &mut scene);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    // ── defensive paths / observability ─────────────────────────────

    #[test]
    fn test_update_skips_when_body_missing() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;

        // A provider that lost all its bodies mid-teardown.
        let empty = SolarSystem::new();
        ctl.update(0.016, &empty, &mut cam, &mut scene);

        assert!(ctl.is_active());
        assert_eq!(ctl.snapshot().unwrap().position, before);
    }

    #[test]
    fn test_update_while_inactive_is_a_noop() {
        let (system, _) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();
        ctl.update(0.016, &system, &mut cam, &mut scene);
        assert_eq!(cam.writes, 0);
    }

    #[test]
    fn test_avatar_stands_on_surface_normal() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.apply_action(Action::MoveForward, true);
        for _ in 0..30 {
            ctl.update(0.05, &system, &mut cam, &mut scene);
        }

        let avatar = scene.avatar.unwrap();
        let normal = (avatar.position - system.body(id).unwrap().center).normalize();
        let avatar_up = avatar.rotation * Vec3::Y;
        assert!((avatar_up - normal).length() < 1e-3);
    }

    #[test]
    fn test_observer_sees_lifecycle_events() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        let entered = Arc::new(AtomicUsize::new(0));
        let exited = Arc::new(AtomicUsize::new(0));
        let (e, x) = (entered.clone(), exited.clone());
        ctl.set_observer(Box::new(move |event| match event {
            WalkEvent::Entered { .. } => {
                e.fetch_add(1, Ordering::SeqCst);
            }
            WalkEvent::Exited => {
                x.fetch_add(1, Ordering::SeqCst);
            }
            WalkEvent::DegenerateNormalRecovered => {}
        }));

        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        ctl.exit(&mut cam, &mut scene);
        ctl.exit(&mut cam, &mut scene);

        assert_eq!(entered.load(Ordering::SeqCst), 1);
        assert_eq!(exited.load(Ordering::SeqCst), 1, "idempotent exit emits once");
    }

    #[test]
    fn test_input_ignored_while_inactive() {
        let (system, id) = earth_at(Vec3::new(140.0, 0.0, 0.0));
        let (mut cam, mut scene) = (TestCamera::default(), TestScene::default());
        let mut ctl = controller();

        // "Listeners detached": input before enter must not leak in.
        ctl.apply_action(Action::MoveForward, true);
        enter_earth(&mut ctl, &system, id, &mut cam, &mut scene);
        let before = ctl.snapshot().unwrap().position;
        ctl.update(0.016, &system, &mut cam, &mut scene);
        assert!((ctl.snapshot().unwrap().position - before).length() < 1e-6);
    }
}
