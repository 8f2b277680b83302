use scenegen_input::{InputEvent, Key, PointerButton};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Physical key bindings for the first-person controller.
pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Key::Forward,
        KeyCode::KeyS | KeyCode::ArrowDown => Key::Backward,
        KeyCode::KeyA | KeyCode::ArrowLeft => Key::Left,
        KeyCode::KeyD | KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyR => Key::Up,
        KeyCode::KeyF => Key::Down,
        KeyCode::KeyQ => Key::Freeze,
        _ => return None,
    };
    Some(key)
}

pub fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Translate a window event into controller input. Key repeats are dropped.
pub fn translate(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    repeat: false,
                    ..
                },
            ..
        } => {
            let key = map_key(*code)?;
            Some(match state {
                ElementState::Pressed => InputEvent::KeyDown(key),
                ElementState::Released => InputEvent::KeyUp(key),
            })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_button(*button)?;
            Some(match state {
                ElementState::Pressed => InputEvent::PointerDown(button),
                ElementState::Released => InputEvent::PointerUp(button),
            })
        }
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_share_bindings() {
        assert_eq!(map_key(KeyCode::KeyW), map_key(KeyCode::ArrowUp));
        assert_eq!(map_key(KeyCode::KeyA), Some(Key::Left));
        assert_eq!(map_key(KeyCode::KeyQ), Some(Key::Freeze));
        assert_eq!(map_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn left_button_is_primary() {
        assert_eq!(map_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(map_button(MouseButton::Back), None);
    }

    #[test]
    fn focus_loss_translates() {
        assert_eq!(translate(&WindowEvent::Focused(false)), Some(InputEvent::FocusLost));
        assert_eq!(translate(&WindowEvent::Focused(true)), None);
    }
}
