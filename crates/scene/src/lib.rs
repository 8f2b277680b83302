//! Scene graph root: the lights and renderables drawn each frame.
//!
//! # Invariants
//! - Every object is keyed by an `EntityId`; iteration order is the key order
//!   (BTreeMap), never insertion order.
//! - Geometry is CPU-side only. Render backends upload it on first draw.

mod geometry;
mod light;
mod material;
mod scene;

pub use geometry::{Geometry, SphereGeometry};
pub use light::{Light, LightKind};
pub use material::BasicMaterial;
pub use scene::{Mesh, Scene};
