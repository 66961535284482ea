// Input manager - turns raw window events into per-frame input state

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::state::InputState;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and the current input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    state: InputState,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            let Some(action) = self.config.get_action(source) else {
                return;
            };
            match event.state {
                ElementState::Pressed => {
                    // Key repeat is not a new press
                    if !event.repeat {
                        self.state.press(action);
                    }
                }
                ElementState::Released => self.state.release(action),
            }
        }
    }

    /// Treat a window close request like the quit key
    pub fn request_quit(&mut self) {
        self.state.press(Action::Quit);
    }

    /// Start a new frame. Call once per frame after the simulation step.
    pub fn update(&mut self) {
        self.state.update();
    }

    /// Current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Mutable input state, for scripted input
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_uses_default_bindings() {
        let manager = InputManager::default();
        assert!(manager.config().is_bound(Action::Interact));
        assert!(manager.config().is_bound(Action::Choose));
    }

    #[test]
    fn test_request_quit() {
        let mut manager = InputManager::default();
        manager.request_quit();
        assert!(manager.state().quit_requested());

        manager.update();
        assert!(!manager.state().quit_requested());
    }

    #[test]
    fn test_update_clears_edges_but_keeps_held() {
        let mut manager = InputManager::default();
        manager.state_mut().press(Action::MoveLeft);
        assert!(manager.state().just_pressed(Action::MoveLeft));

        manager.update();
        assert!(!manager.state().just_pressed(Action::MoveLeft));
        assert!(manager.state().is_pressed(Action::MoveLeft));

        manager.reset();
        assert!(!manager.state().is_pressed(Action::MoveLeft));
    }
}
