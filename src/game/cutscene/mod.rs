// Cutscenes: timed cues with dialogue and scripted actor commands
//
// - `hook`: commands run against actors and the custom hook table
// - `cue`: a single step of a scene
// - `scene`: the sequencer

pub mod cue;
pub mod hook;
pub mod scene;

pub use cue::CutSceneCue;
pub use hook::{HookArg, HookCommand, HookFn, HookTable};
pub use scene::CutScene;
