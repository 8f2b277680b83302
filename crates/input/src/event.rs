use glam::Vec2;

/// Logical keys understood by camera controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    /// Toggles the controller's freeze state.
    Freeze,
}

impl Key {
    /// Whether holding this key translates the camera.
    pub fn is_movement(self) -> bool {
        !matches!(self, Key::Freeze)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A single input occurrence routed from the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    /// Relative pointer motion in logical pixels.
    PointerMoved { delta: Vec2 },
    /// The host window lost keyboard focus; held state must be released.
    FocusLost,
}
