// Key bindings: the stock layout plus remaps read from the engine config

use super::action::{default_bindings, Action, InputSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// One `[[controls]]` entry: the keys that trigger `action`.
///
/// ```toml
/// [[controls]]
/// action = "interact"
/// keys = ["KeyE", "Enter"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub action: Action,
    pub keys: Vec<KeyCode>,
}

/// Maps input sources (keys) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// The stock layout with `remaps` applied on top.
    ///
    /// Every action named in `remaps` loses its stock keys; actions left
    /// out keep theirs. A key claimed by a remap stops triggering whatever
    /// it was bound to before.
    pub fn with_remaps(remaps: &[KeyBinding]) -> Self {
        let mut config = Self::default();
        for remap in remaps {
            config.unbind_action(remap.action);
        }
        for remap in remaps {
            for &key in &remap.keys {
                config.bind(InputSource::key(key), remap.action);
            }
            log::debug!("{:?} bound to {:?}", remap.action, remap.keys);
        }
        for action in Action::ALL {
            if !config.is_bound(action) {
                log::warn!("No key left for {:?}", action);
            }
        }
        config
    }

    /// Bind an input source to an action, replacing its previous action
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Keys bound to `action`, in no particular order
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(InputSource::Keyboard(key), _)| *key)
            .collect()
    }

    pub fn is_bound(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
