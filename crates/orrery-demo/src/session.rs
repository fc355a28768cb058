//! The scripted demo session: a fixed-timestep tour standing in for the
//! interactive render loop.
//!
//! Phases run back to back on a 60 Hz tick: fly the camera to Earth with an
//! eased transition, enter surface mode, walk/sprint/look around, and exit
//! back to the system overview. Every tick advances the orbital simulation,
//! so the walk happens on a planet that is genuinely moving.

use glam::Vec2;
use orrery_camera::{Camera, CameraSnapshot, CameraTransition, EasingFunction, FollowCamera};
use orrery_config::Config;
use orrery_input::Action;
use orrery_system::SolarSystem;
use orrery_walk::{
    AvatarTransform, EnterError, LocomotionController, SceneSink, WalkEvent, WalkTuning,
};
use tracing::{debug, info, warn};

use crate::hud;

/// 60 Hz simulation tick.
const TICK: f32 = 1.0 / 60.0;

/// Session failure: the script needs a body that the catalog lacks, or the
/// surface mode refused to start.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The scripted body is missing from the system.
    #[error("body {0:?} not found in the system")]
    BodyNotFound(String),
    /// Surface mode rejected the body.
    #[error("could not enter surface mode: {0}")]
    Enter(#[from] EnterError),
}

/// Scene sink for the headless session: records the avatar transform and
/// logs lifecycle changes instead of touching a scene graph.
#[derive(Debug, Default)]
struct HeadlessScene {
    avatar: Option<AvatarTransform>,
}

impl SceneSink for HeadlessScene {
    fn attach_avatar(&mut self, transform: AvatarTransform) {
        debug!(position = ?transform.position, "avatar attached");
        self.avatar = Some(transform);
    }

    fn update_avatar(&mut self, transform: AvatarTransform) {
        self.avatar = Some(transform);
    }

    fn detach_avatar(&mut self) {
        debug!("avatar detached");
        self.avatar = None;
    }
}

/// One scripted walking phase: hold a set of actions for a duration while
/// feeding a constant per-tick mouse delta.
struct Phase {
    name: &'static str,
    seconds: f32,
    held: &'static [Action],
    mouse_per_tick: Vec2,
}

const WALK_SCRIPT: [Phase; 5] = [
    Phase {
        name: "walk forward",
        seconds: 3.0,
        held: &[Action::MoveForward],
        mouse_per_tick: Vec2::ZERO,
    },
    Phase {
        name: "sprint forward",
        seconds: 2.0,
        held: &[Action::MoveForward, Action::Sprint],
        mouse_per_tick: Vec2::ZERO,
    },
    Phase {
        name: "look around",
        seconds: 2.0,
        held: &[],
        mouse_per_tick: Vec2::new(25.0, -4.0),
    },
    Phase {
        name: "strafe along the horizon",
        seconds: 2.0,
        held: &[Action::StrafeRight],
        mouse_per_tick: Vec2::ZERO,
    },
    Phase {
        name: "coast to a stop",
        seconds: 1.0,
        held: &[],
        mouse_per_tick: Vec2::ZERO,
    },
];

/// Build locomotion tuning from the loaded configuration.
fn walk_tuning(config: &Config) -> WalkTuning {
    WalkTuning {
        walk_speed: config.locomotion.walk_speed,
        sprint_multiplier: config.locomotion.sprint_multiplier,
        surface_offset: config.locomotion.surface_offset,
        friction: config.locomotion.friction,
        mouse_sensitivity: config.input.mouse_sensitivity,
        invert_y: config.input.invert_y,
        max_step: config.locomotion.max_step,
    }
}

/// Once-per-second HUD cadence, honoring the `debug.log_hud` config flag.
struct HudTicker {
    enabled: bool,
    ticks: u32,
}

impl HudTicker {
    fn new(enabled: bool) -> Self {
        Self { enabled, ticks: 0 }
    }

    /// Count one tick; true when a HUD line is due this tick.
    fn tick(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.ticks += 1;
        if self.ticks >= 60 {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

/// Run the whole scripted session against a live solar system.
pub fn run(config: &Config, system: &mut SolarSystem) -> Result<(), SessionError> {
    let mut camera = Camera::default();
    let mut scene = HeadlessScene::default();

    let earth_id = system
        .find("Earth")
        .map(|b| b.id)
        .ok_or_else(|| SessionError::BodyNotFound("Earth".to_string()))?;

    // Phase 1: eased fly-to from the overview shot to a follow view of Earth.
    info!("flying to Earth");
    let follow = FollowCamera::default();
    let mut target_camera = camera;
    if let Some(earth) = system.body(earth_id) {
        follow.update(earth, &mut target_camera);
    }
    let mut transition = CameraTransition::new(
        CameraSnapshot::of(&camera),
        CameraSnapshot::of(&target_camera),
        2.0,
        EasingFunction::EaseOut,
    );
    while !transition.advance(TICK, &mut camera) {
        system.advance(TICK);
    }

    // Phase 2: drop to the surface.
    let mut controller = LocomotionController::new(walk_tuning(config));
    controller.set_observer(Box::new(|event| match event {
        WalkEvent::Entered { body } => info!(body = body.index(), "surface mode entered"),
        WalkEvent::Exited => info!("surface mode exited"),
        WalkEvent::DegenerateNormalRecovered => {
            warn!("degenerate surface normal; recovered via fallback");
        }
    }));

    let earth = system
        .body(earth_id)
        .ok_or_else(|| SessionError::BodyNotFound("Earth".to_string()))?
        .clone();
    controller.enter(&mut camera, &mut scene, &earth)?;
    controller.set_pointer_captured(true);

    // Phase 3: the walking script.
    let mut hud_ticker = HudTicker::new(config.debug.log_hud);
    for phase in &WALK_SCRIPT {
        info!(phase = phase.name, seconds = phase.seconds, "phase start");
        for action in phase.held {
            controller.apply_action(*action, true);
        }

        let ticks = (phase.seconds / TICK).round() as u32;
        for _ in 0..ticks {
            controller.apply_mouse_delta(phase.mouse_per_tick.x, phase.mouse_per_tick.y);
            system.advance(TICK);
            controller.update(TICK, system, &mut camera, &mut scene);

            if hud_ticker.tick()
                && let Some(snapshot) = controller.snapshot()
            {
                info!("{}", hud::format_snapshot(&snapshot));
            }
        }

        for action in phase.held {
            controller.apply_action(*action, false);
        }
    }

    // Phase 4: back to the overview.
    controller.exit(&mut camera, &mut scene);
    info!(position = ?camera.position, "session complete");
    Ok(())
}
