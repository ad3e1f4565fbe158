// Per-player input state management

use super::action::Action;
use glam::Vec2;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Last cursor position in screen pixels, `None` until the first sample
    cursor: Option<Vec2>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press. Returns true for a fresh press,
    /// false when the action was already held (e.g. key repeat).
    pub(crate) fn press(&mut self, action: Action) -> bool {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            true
        } else {
            false
        }
    }

    /// Register an action release. Returns true if the action was held.
    pub(crate) fn release(&mut self, action: Action) -> bool {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
            true
        } else {
            false
        }
    }

    /// Record a new cursor position and return how far it moved since the
    /// previous sample (previous minus current). The first sample never moves.
    pub(crate) fn move_cursor(&mut self, position: Vec2) -> Vec2 {
        let previous = self.cursor.replace(position).unwrap_or(position);
        previous - position
    }

    /// Current cursor position (origin when the cursor has not been seen yet)
    pub fn cursor(&self) -> Vec2 {
        self.cursor.unwrap_or(Vec2::ZERO)
    }

    /// Whether any cursor position has been reported
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// Update input state for a new frame
    /// Call this once per frame after processing all events
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.cursor = None;
    }

    /// Get all currently pressed actions
    pub fn get_pressed_actions(&self) -> Vec<Action> {
        self.pressed.iter().copied().collect()
    }

    /// Movement intent on the ground plane: x is right (+) / left (-),
    /// y is back (+) / forward (-), matching camera space where forward is -Z
    pub fn get_direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;

        if self.is_pressed(Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            direction.x += 1.0;
        }
        if self.is_pressed(Action::MoveForward) {
            direction.y -= 1.0;
        }
        if self.is_pressed(Action::MoveBack) {
            direction.y += 1.0;
        }

        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new();
        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.has_cursor());
        assert_eq!(input.cursor(), Vec2::ZERO);
    }

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        assert!(input.press(Action::Jump));
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_repeated_press_is_not_fresh() {
        let mut input = PlayerInput::new();
        assert!(input.press(Action::Jump));
        assert!(!input.press(Action::Jump));
        assert_eq!(input.get_pressed_actions().len(), 1, "Should not duplicate actions");
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.update();
        assert!(input.release(Action::Jump));
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new();
        assert!(!input.release(Action::Jump));
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.update();
        assert!(input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_first_cursor_sample_does_not_move() {
        let mut input = PlayerInput::new();
        let delta = input.move_cursor(Vec2::new(300.0, 200.0));
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(input.cursor(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_cursor_delta() {
        let mut input = PlayerInput::new();
        input.move_cursor(Vec2::new(300.0, 200.0));
        let delta = input.move_cursor(Vec2::new(310.0, 195.0));
        assert_eq!(delta, Vec2::new(-10.0, 5.0));
    }

    #[test]
    fn test_direction() {
        let mut input = PlayerInput::new();
        assert_eq!(input.get_direction(), Vec2::ZERO);

        input.press(Action::MoveForward);
        input.press(Action::MoveRight);
        assert_eq!(input.get_direction(), Vec2::new(1.0, -1.0));

        input.press(Action::MoveBack);
        input.press(Action::MoveLeft);
        assert_eq!(input.get_direction(), Vec2::ZERO);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.move_cursor(Vec2::ONE);
        input.reset();

        assert!(input.get_pressed_actions().is_empty());
        assert!(!input.has_cursor());
    }
}
