// Input handling system
//
// This module turns keyboard events into per-frame action state.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Key bindings and remaps from the engine config
// - `state`: Held keys and key-down edges for one frame
// - `manager`: Feeds winit events through the bindings into the state
//
// ## Usage Example
//
// ```rust
// use rusted_grove::engine::input::{InputConfig, InputManager};
//
// let mut input = InputManager::new(InputConfig::with_remaps(&config.controls));
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Step the game with the sampled state
// let render_list = game.step(delta_ms, input.state())?;
//
// // Then clear the edge events for the next frame
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::{InputConfig, KeyBinding};
pub use manager::InputManager;
pub use state::InputState;
