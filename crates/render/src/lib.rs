//! Renderer binding: the drawing-surface interface every backend implements.
//!
//! # Invariants
//! - A renderer never mutates the scene or the camera.
//! - `size()` reports logical pixels; backing stores are `size × pixel_ratio`
//!   unless the host supplied an exact physical size.
//!
//! `HeadlessRenderer` records each draw instead of rasterizing, for tests and
//! for hosts without a GPU.

mod error;
mod headless;
mod renderer;

pub use error::RenderError;
pub use headless::{FrameRecord, HeadlessRenderer};
pub use renderer::{Renderer, RendererSettings};
