use crate::BootstrapError;
use glam::Vec3;
use scenegen_common::Color;

/// The debug mesh inserted so the scene is never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
    pub wireframe: bool,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            width_segments: 16,
            height_segments: 16,
            color: Color::from_hex(0x222324),
            wireframe: true,
        }
    }
}

/// Fixed parameters of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub clear_color: Color,
    pub placeholder: PlaceholderConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 1.0,
            far: 1000.0,
            camera_position: Vec3::new(0.0, 10.0, 0.0),
            clear_color: Color::from_hex(0xffffff),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(BootstrapError::InvalidCamera(format!(
                "field of view {} must be within (0, 180) degrees",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(BootstrapError::InvalidCamera(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        if !self.camera_position.is_finite() {
            return Err(BootstrapError::InvalidCamera(
                "camera position must be finite".into(),
            ));
        }
        if !(self.placeholder.radius > 0.0 && self.placeholder.radius.is_finite()) {
            return Err(BootstrapError::InvalidPlaceholder(format!(
                "radius {} must be positive",
                self.placeholder.radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bootstrap_constants() {
        let c = SceneConfig::default();
        assert_eq!(c.fov_degrees, 90.0);
        assert_eq!((c.near, c.far), (1.0, 1000.0));
        assert_eq!(c.camera_position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(c.clear_color.to_hex(), 0xffffff);
        assert_eq!(c.placeholder.color.to_hex(), 0x222324);
        assert!(c.placeholder.wireframe);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let c = SceneConfig {
            near: 10.0,
            far: 1.0,
            ..SceneConfig::default()
        };
        assert!(matches!(c.validate(), Err(BootstrapError::InvalidCamera(_))));
    }

    #[test]
    fn rejects_nan_fov() {
        let c = SceneConfig {
            fov_degrees: f32::NAN,
            ..SceneConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_empty_placeholder() {
        let mut c = SceneConfig::default();
        c.placeholder.radius = 0.0;
        assert!(matches!(c.validate(), Err(BootstrapError::InvalidPlaceholder(_))));
    }
}
