/// Logical pixel dimensions of the host window.
///
/// Both dimensions are at least 1, so `aspect()` never divides by zero.
/// Minimized windows report 0×0 on several platforms; those sizes clamp to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Physical size for a given pixel ratio, rounded and clamped to at least 1×1.
    pub fn physical(&self, pixel_ratio: f64) -> (u32, u32) {
        let scale = |v: u32| ((v as f64 * pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
