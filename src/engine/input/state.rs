// Per-frame input state

use super::action::Action;
use std::collections::HashSet;

/// Input state sampled for one frame: which actions are held, and which had a
/// key-down event since the previous frame
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions pressed this frame (key-down events)
    just_pressed: HashSet<Action>,

    /// Actions released this frame
    just_released: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Whether the player asked to leave
    pub fn quit_requested(&self) -> bool {
        self.just_pressed(Action::Quit)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Start a new frame. Held actions stay held; edge events are cleared.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Get directional input as (horizontal, vertical), each -1, 0 or 1.
    /// Down is positive, matching screen coordinates.
    pub fn direction(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = InputState::new();
        input.press(Action::Interact);
        assert!(input.is_pressed(Action::Interact));
        assert!(input.just_pressed(Action::Interact));
    }

    #[test]
    fn test_release_action() {
        let mut input = InputState::new();
        input.press(Action::Interact);
        input.update();
        input.release(Action::Interact);
        assert!(!input.is_pressed(Action::Interact));
        assert!(input.just_released(Action::Interact));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = InputState::new();
        input.press(Action::Choose);
        input.update();
        assert!(input.is_pressed(Action::Choose));
        assert!(!input.just_pressed(Action::Choose));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.press(Action::Interact);
        input.update();
        input.press(Action::Interact);
        assert!(!input.just_pressed(Action::Interact));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = InputState::new();
        input.release(Action::MoveUp);
        assert!(!input.just_released(Action::MoveUp));
    }

    #[test]
    fn test_direction() {
        let mut input = InputState::new();
        assert_eq!(input.direction(), (0.0, 0.0));

        input.press(Action::MoveRight);
        input.press(Action::MoveUp);
        assert_eq!(input.direction(), (1.0, -1.0));

        input.press(Action::MoveLeft);
        assert_eq!(input.direction(), (0.0, -1.0));
    }

    #[test]
    fn test_quit_and_reset() {
        let mut input = InputState::new();
        input.press(Action::Quit);
        assert!(input.quit_requested());
        input.reset();
        assert!(!input.quit_requested());
        assert!(!input.is_pressed(Action::Quit));
    }
}
