// Input manager - routes raw key/mouse edges through the bindings

use super::action::{default_bindings, Action, InputSource, Key, MouseButton};
use super::player::PlayerInput;
use glam::Vec2;
use std::collections::HashMap;

/// Main input manager: owns the bindings and the player's input state
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Input state of the local player
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    /// Create an input manager from a list of bindings
    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            player: PlayerInput::new(),
        }
    }

    /// Bind an input source to an action, replacing any previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Key went down. Returns the bound action on a fresh press only.
    pub fn key_down(&mut self, key: Key) -> Option<Action> {
        self.press(InputSource::key(key))
    }

    /// Key went up. Returns the bound action if it was held.
    pub fn key_up(&mut self, key: Key) -> Option<Action> {
        self.release(InputSource::key(key))
    }

    /// Mouse button went down. Returns the bound action on a fresh press only.
    pub fn mouse_down(&mut self, button: MouseButton) -> Option<Action> {
        self.press(InputSource::mouse(button))
    }

    /// Mouse button went up. Returns the bound action if it was held.
    pub fn mouse_up(&mut self, button: MouseButton) -> Option<Action> {
        self.release(InputSource::mouse(button))
    }

    /// Cursor moved to an absolute position; returns previous minus current
    pub fn mouse_move(&mut self, position: Vec2) -> Vec2 {
        self.player.move_cursor(position)
    }

    fn press(&mut self, source: InputSource) -> Option<Action> {
        let action = self.get_action(source)?;
        self.player.press(action).then_some(action)
    }

    fn release(&mut self, source: InputSource) -> Option<Action> {
        let action = self.get_action(source)?;
        self.player.release(action).then_some(action)
    }

    /// Update the player input state for a new frame
    /// Call this once per frame after processing all events
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Input state of the local player
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Reset the player's input state
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_maps_to_action() {
        let mut manager = InputManager::new();
        assert_eq!(manager.key_down(Key::W), Some(Action::MoveForward));
        assert!(manager.player().is_pressed(Action::MoveForward));
    }

    #[test]
    fn test_repeat_key_down_is_ignored() {
        let mut manager = InputManager::new();
        assert_eq!(manager.key_down(Key::Space), Some(Action::Jump));
        assert_eq!(manager.key_down(Key::Space), None);
        assert!(manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_key_up_without_down() {
        let mut manager = InputManager::new();
        assert_eq!(manager.key_up(Key::A), None);
    }

    #[test]
    fn test_key_up_releases() {
        let mut manager = InputManager::new();
        manager.key_down(Key::D);
        manager.update();
        assert_eq!(manager.key_up(Key::D), Some(Action::MoveRight));
        assert!(!manager.player().is_pressed(Action::MoveRight));
        assert!(manager.player().just_released(Action::MoveRight));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut manager = InputManager::new();
        assert_eq!(
            manager.mouse_down(MouseButton::Left),
            Some(Action::AddMaterial)
        );
        assert_eq!(
            manager.mouse_down(MouseButton::Right),
            Some(Action::RemoveMaterial)
        );
        assert_eq!(
            manager.mouse_up(MouseButton::Left),
            Some(Action::AddMaterial)
        );
        assert!(manager.player().is_pressed(Action::RemoveMaterial));
    }

    #[test]
    fn test_unbound_source_is_ignored() {
        let mut manager = InputManager::with_bindings(Vec::new());
        assert_eq!(manager.key_down(Key::W), None);
        assert!(manager.player().get_pressed_actions().is_empty());
    }

    #[test]
    fn test_rebind() {
        let mut manager = InputManager::new();
        manager.bind(InputSource::key(Key::W), Action::Jump);
        assert_eq!(manager.key_down(Key::W), Some(Action::Jump));
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::new();
        manager.key_down(Key::S);
        assert!(manager.player().just_pressed(Action::MoveBack));

        manager.update();
        assert!(!manager.player().just_pressed(Action::MoveBack));
        assert!(manager.player().is_pressed(Action::MoveBack));
    }

    #[test]
    fn test_mouse_move_delta() {
        let mut manager = InputManager::new();
        assert_eq!(manager.mouse_move(Vec2::new(10.0, 10.0)), Vec2::ZERO);
        assert_eq!(manager.mouse_move(Vec2::new(4.0, 10.0)), Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut manager = InputManager::new();
        manager.key_down(Key::W);
        manager.reset();
        assert!(!manager.player().is_pressed(Action::MoveForward));
    }
}
