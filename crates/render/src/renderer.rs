use crate::RenderError;
use scenegen_camera::PerspectiveCamera;
use scenegen_common::{Color, Viewport};
use scenegen_scene::Scene;

/// Construction parameters for a renderer binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    /// Multisample edges when the adapter supports it.
    pub antialias: bool,
    /// Request a surface that composites with what is behind the window.
    pub alpha: bool,
    /// Allocate a depth buffer and depth-test draws.
    pub depth: bool,
    pub clear_color: Color,
    /// Physical pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: true,
            depth: true,
            clear_color: Color::WHITE,
            pixel_ratio: 1.0,
        }
    }
}

/// A drawing surface that renders a scene through a camera.
///
/// Implementations are created once and live for the process lifetime.
pub trait Renderer {
    /// Draw one frame synchronously.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Current size in logical pixels.
    fn size(&self) -> Viewport;

    /// Resize the drawing surface to `viewport` logical pixels.
    fn set_size(&mut self, viewport: Viewport);

    fn pixel_ratio(&self) -> f64;

    fn set_pixel_ratio(&mut self, ratio: f64);

    /// Backing-store size in physical pixels.
    fn physical_size(&self) -> (u32, u32);

    /// Use exactly `physical` pixels for the backing store instead of
    /// `size × pixel_ratio`. Reset by the next `set_size` or `set_pixel_ratio`.
    fn set_physical_size(&mut self, physical: (u32, u32));
}
