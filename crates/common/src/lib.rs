//! Shared value types used by every scenegen crate.

mod color;
mod types;
mod viewport;

pub use color::Color;
pub use types::{EntityId, Transform};
pub use viewport::Viewport;
