//! wgpu renderer binding.
//!
//! Owns the instance, surface, device and queue for the process lifetime.
//! Meshes are drawn unlit with their material color; wireframe materials use
//! a line-list pipeline over the unique triangle edges.
//!
//! # Invariants
//! - The surface is configured at `size × pixel_ratio` physical pixels, or at
//!   the exact size set by `set_physical_size`. Size changes take effect at the
//!   start of the next frame.
//! - MSAA and depth attachments always match the configured surface size.
//! - GPU buffers for a mesh are uploaded once, on the first frame that draws it.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
