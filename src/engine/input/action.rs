// Game action definitions and mappings

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
///
/// Dialogue reuses the movement and interaction actions: left/right cycle
/// through choices, interact reveals or turns the page, choose confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Interaction
    Interact,
    Choose,

    // Meta actions
    Quit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::Interact,
        Action::Choose,
        Action::Quit,
    ];
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD)
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        // Talking
        (InputSource::key(KeyCode::KeyE), Action::Interact),
        (InputSource::key(KeyCode::KeyQ), Action::Choose),
        // Leaving
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Interact, Action::Interact);
        assert_ne!(Action::Interact, Action::Choose);
    }

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = default_bindings();
        for action in Action::ALL {
            assert!(bindings.iter().any(|(_, a)| *a == action), "{:?} unbound", action);
        }
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let bindings = default_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
