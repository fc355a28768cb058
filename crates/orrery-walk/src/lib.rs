//! First-person surface locomotion over orbiting spherical bodies.
//!
//! The hard problem this crate solves: keep a human-scale avatar pinned to
//! the surface of a planet that is itself translating along an orbit every
//! frame, while integrating keyboard/mouse input into planar motion, camera
//! orientation, and surface-normal alignment — without drift.
//!
//! Two cooperating pieces:
//! - [`SurfaceFrame`]: turns a body's rigid motion into a passenger
//!   displacement and enforces a fixed stand-off distance from the surface.
//! - [`LocomotionController`]: owns the player state, consumes input, and
//!   publishes camera and avatar transforms through narrow sink traits.
//!
//! Rendering, orbital animation, and input devices live in sibling crates;
//! this one only reads body centers/radii and writes transforms.

pub mod input_state;
pub mod locomotion;
pub mod surface_frame;

pub use input_state::InputState;
pub use locomotion::{
    AvatarTransform, BodyProvider, CameraRig, EnterError, LocomotionController, PlayerSnapshot,
    SceneSink, WalkEvent, WalkTuning, DEFAULT_CAMERA_POSITION,
};
pub use surface_frame::{DegenerateNormal, SurfaceFrame, SURFACE_EPSILON};

use orrery_system::{Body, BodyId, SolarSystem};

impl BodyProvider for SolarSystem {
    fn body(&self, id: BodyId) -> Option<&Body> {
        SolarSystem::body(self, id)
    }
}
