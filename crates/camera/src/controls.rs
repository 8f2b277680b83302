use crate::PerspectiveCamera;
use glam::Vec3;
use scenegen_input::{InputEvent, Key, PointerButton};
use std::collections::BTreeSet;

const MAX_PITCH_DEGREES: f32 = 85.0;

/// Receives the controller's "changed" notification.
///
/// Called synchronously, after the pose has been mutated and before the
/// controller returns to its caller.
pub trait ChangeListener {
    fn on_change(&mut self, camera: &mut PerspectiveCamera);
}

impl<F> ChangeListener for F
where
    F: FnMut(&mut PerspectiveCamera),
{
    fn on_change(&mut self, camera: &mut PerspectiveCamera) {
        self(camera)
    }
}

/// First-person controller: held keys translate, primary-button drag looks around.
#[derive(Debug, Clone)]
pub struct FirstPersonControls {
    /// World units per second.
    pub movement_speed: f32,
    /// Radians per logical pixel of pointer motion.
    pub look_speed: f32,
    pub enabled: bool,
    frozen: bool,
    held: BTreeSet<Key>,
    looking: bool,
}

impl Default for FirstPersonControls {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            look_speed: 0.003,
            enabled: true,
            frozen: false,
            held: BTreeSet::new(),
            looking: false,
        }
    }
}

impl FirstPersonControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether `update` would move the camera.
    pub fn is_moving(&self) -> bool {
        self.enabled && !self.frozen && self.held.iter().any(|k| k.is_movement())
    }

    /// Apply one input event. Returns true if the pose changed and the listener ran.
    pub fn handle_input(
        &mut self,
        camera: &mut PerspectiveCamera,
        event: &InputEvent,
        listener: &mut dyn ChangeListener,
    ) -> bool {
        match *event {
            InputEvent::KeyDown(Key::Freeze) => {
                self.frozen = !self.frozen;
                tracing::debug!(frozen = self.frozen, "camera controls freeze toggled");
            }
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            InputEvent::PointerDown(PointerButton::Primary) => self.looking = true,
            InputEvent::PointerUp(PointerButton::Primary) => self.looking = false,
            InputEvent::PointerDown(_) | InputEvent::PointerUp(_) => {}
            InputEvent::PointerMoved { delta } => {
                if self.looking && self.enabled && !self.frozen {
                    return self.rotate(camera, delta.x, delta.y, listener);
                }
            }
            InputEvent::FocusLost => {
                self.held.clear();
                self.looking = false;
            }
        }
        false
    }

    /// Advance held-key movement by `dt` seconds. Returns true if the camera moved.
    pub fn update(
        &mut self,
        camera: &mut PerspectiveCamera,
        dt: f32,
        listener: &mut dyn ChangeListener,
    ) -> bool {
        if !self.is_moving() || dt <= 0.0 {
            return false;
        }

        let axis = |pos: Key, neg: Key| {
            self.held.contains(&pos) as i32 as f32 - self.held.contains(&neg) as i32 as f32
        };
        let step = self.movement_speed * dt;
        let delta = camera.forward() * axis(Key::Forward, Key::Backward)
            + camera.right() * axis(Key::Right, Key::Left)
            + Vec3::Y * axis(Key::Up, Key::Down);
        if delta == Vec3::ZERO {
            return false;
        }

        camera.position += delta * step;
        listener.on_change(camera);
        true
    }

    fn rotate(
        &mut self,
        camera: &mut PerspectiveCamera,
        dx: f32,
        dy: f32,
        listener: &mut dyn ChangeListener,
    ) -> bool {
        // a pose already past the limit (e.g. from look_at) is kept, never pushed further
        let limit = MAX_PITCH_DEGREES.to_radians();
        let (lo, hi) = (camera.pitch.min(-limit), camera.pitch.max(limit));
        let yaw = camera.yaw + dx * self.look_speed;
        let pitch = (camera.pitch - dy * self.look_speed).clamp(lo, hi);
        if yaw == camera.yaw && pitch == camera.pitch {
            return false;
        }
        camera.yaw = yaw;
        camera.pitch = pitch;
        listener.on_change(camera);
        true
    }
}
