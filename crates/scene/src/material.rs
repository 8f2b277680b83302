use scenegen_common::Color;

/// Unlit, single-color material. Lights do not affect it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    /// Draw triangle edges as lines instead of filled faces.
    pub wireframe: bool,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            wireframe: false,
        }
    }
}

impl BasicMaterial {
    pub fn wireframe(color: Color) -> Self {
        Self {
            color,
            wireframe: true,
        }
    }
}
