use crate::{ChangeListener, FirstPersonControls, PerspectiveCamera};
use glam::Vec3;
use scenegen_input::InputEvent;

/// A camera together with the controller that drives it.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: PerspectiveCamera,
    pub controls: FirstPersonControls,
}

impl CameraRig {
    /// Place `camera` at `position`, aim it at `target`, and compute its matrices.
    pub fn new(mut camera: PerspectiveCamera, position: Vec3, target: Vec3) -> Self {
        camera.position = position;
        camera.look_at(target);
        camera.update_projection_matrix();
        tracing::debug!(
            fov = camera.fov,
            aspect = camera.aspect,
            near = camera.near,
            far = camera.far,
            "camera rig created"
        );
        Self {
            camera,
            controls: FirstPersonControls::new(),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent, listener: &mut dyn ChangeListener) -> bool {
        self.controls.handle_input(&mut self.camera, event, listener)
    }

    pub fn update(&mut self, dt: f32, listener: &mut dyn ChangeListener) -> bool {
        self.controls.update(&mut self.camera, dt, listener)
    }

    /// Rederive the aspect ratio and refresh the matrices.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
        self.camera.update_projection_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegen_input::Key;

    #[test]
    fn new_rig_faces_target() {
        let rig = CameraRig::new(
            PerspectiveCamera::new(90.0, 2.0, 1.0, 1000.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::ZERO,
        );
        assert!(rig.camera.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));
        assert!(!rig.camera.view_projection().is_nan());
    }

    #[test]
    fn set_aspect_refreshes_projection() {
        let mut rig = CameraRig::new(PerspectiveCamera::default(), Vec3::Z, Vec3::ZERO);
        let before = rig.camera.projection_matrix();
        rig.set_aspect(3.0);
        assert_eq!(rig.camera.aspect, 3.0);
        assert_ne!(rig.camera.projection_matrix(), before);
    }

    #[test]
    fn update_forwards_to_controls() {
        let mut rig = CameraRig::new(PerspectiveCamera::default(), Vec3::Z, Vec3::ZERO);
        let mut seen = Vec::new();
        let mut listener = |cam: &mut PerspectiveCamera| seen.push(cam.position);
        rig.handle_input(&InputEvent::KeyDown(Key::Down), &mut listener);
        assert!(rig.update(0.1, &mut listener));
        assert_eq!(seen.len(), 1);
        assert!(seen[0].y < 0.0);
    }
}
