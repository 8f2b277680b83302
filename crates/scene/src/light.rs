use glam::Vec3;
use scenegen_common::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays travelling along `direction`.
    Directional { direction: Vec3 },
    /// Omnidirectional light at `position`, fading to zero at `range` (0 = no falloff).
    Point { position: Vec3, range: f32 },
}

/// A light source in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn directional(color: Color, intensity: f32, direction: Vec3) -> Self {
        Self {
            kind: LightKind::Directional {
                direction: direction.normalize_or(Vec3::NEG_Y),
            },
            color,
            intensity,
        }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3, range: f32) -> Self {
        Self {
            kind: LightKind::Point {
                position,
                range: range.max(0.0),
            },
            color,
            intensity,
        }
    }
}
