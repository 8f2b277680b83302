//! Camera rig: perspective projection, pose, and the first-person controller.
//!
//! # Invariants
//! - Controllers only mutate pose (position, yaw, pitch). Matrices are
//!   recomputed by `update_projection_matrix`, which the change listener calls
//!   before anything draws with them.
//! - Change notifications are synchronous and happen on the caller's thread.

mod camera;
mod controls;
mod rig;

pub use camera::PerspectiveCamera;
pub use controls::{ChangeListener, FirstPersonControls};
pub use rig::CameraRig;
