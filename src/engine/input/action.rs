// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// The keys the game listens to. Nothing else can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
}

impl Key {
    /// Map a physical winit key, `None` for keys the game ignores
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Key::W),
            KeyCode::KeyA => Some(Key::A),
            KeyCode::KeyS => Some(Key::S),
            KeyCode::KeyD => Some(Key::D),
            KeyCode::Space => Some(Key::Space),
            _ => None,
        }
    }
}

/// Raw key codes in declaration order: W = 0 .. Space = 4
impl TryFrom<u32> for Key {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Key::W),
            1 => Ok(Key::A),
            2 => Ok(Key::S),
            3 => Ok(Key::D),
            4 => Ok(Key::Space),
            other => Err(other),
        }
    }
}

/// The two mouse buttons the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// Boundary representation: `true` is the left button, anything else is right
    pub fn from_is_left(is_left: bool) -> Self {
        if is_left {
            MouseButton::Left
        } else {
            MouseButton::Right
        }
    }

    /// Map a winit mouse button, `None` for middle/extra buttons
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement, relative to the camera heading
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,

    // Sculpting
    AddMaterial,
    RemoveMaterial,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(Key),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(key: Key) -> Self {
        Self::Keyboard(key)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD - standard gaming layout)
        (InputSource::key(Key::W), Action::MoveForward),
        (InputSource::key(Key::S), Action::MoveBack),
        (InputSource::key(Key::A), Action::MoveLeft),
        (InputSource::key(Key::D), Action::MoveRight),
        (InputSource::key(Key::Space), Action::Jump),
        // Sculpting (mouse buttons)
        (InputSource::mouse(MouseButton::Left), Action::AddMaterial),
        (InputSource::mouse(MouseButton::Right), Action::RemoveMaterial),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_valid_codes() {
        assert_eq!(Key::try_from(0), Ok(Key::W));
        assert_eq!(Key::try_from(1), Ok(Key::A));
        assert_eq!(Key::try_from(2), Ok(Key::S));
        assert_eq!(Key::try_from(3), Ok(Key::D));
        assert_eq!(Key::try_from(4), Ok(Key::Space));
    }

    #[test]
    fn test_key_rejects_out_of_range_codes() {
        assert_eq!(Key::try_from(5), Err(5));
        assert_eq!(Key::try_from(u32::MAX), Err(u32::MAX));
    }

    #[test]
    fn test_key_from_winit() {
        assert_eq!(Key::from_key_code(KeyCode::KeyW), Some(Key::W));
        assert_eq!(Key::from_key_code(KeyCode::Space), Some(Key::Space));
        assert_eq!(Key::from_key_code(KeyCode::Escape), None);
    }

    #[test]
    fn test_mouse_button_from_flag() {
        assert_eq!(MouseButton::from_is_left(true), MouseButton::Left);
        assert_eq!(MouseButton::from_is_left(false), MouseButton::Right);
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Middle),
            None
        );
    }

    #[test]
    fn test_default_bindings_cover_every_source() {
        let bindings = default_bindings();
        assert_eq!(bindings.len(), 7);

        for key in [Key::W, Key::A, Key::S, Key::D, Key::Space] {
            assert!(bindings.iter().any(|(s, _)| *s == InputSource::key(key)));
        }
        assert!(bindings
            .iter()
            .any(|(s, a)| *s == InputSource::mouse(MouseButton::Left) && *a == Action::AddMaterial));
    }
}
