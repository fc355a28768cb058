//! Camera controllers for the solar system viewer.
//!
//! [`Camera`] is the single render-facing camera state; everything else in
//! this crate is a controller that writes into it. [`FreeFlyCamera`] gives
//! unrestricted noclip flight for browsing the system, [`FollowCamera`]
//! tracks an orbiting body at a fixed offset, and [`CameraTransition`]
//! tweens between camera states for fly-to moves. The surface walking mode
//! drives the same [`Camera`] through its rig trait, so mode switches never
//! juggle two camera objects.

pub mod camera;
pub mod follow;
pub mod free_fly;
pub mod transition;

pub use camera::Camera;
pub use follow::FollowCamera;
pub use free_fly::FreeFlyCamera;
pub use transition::{CameraSnapshot, CameraTransition, EasingFunction};
