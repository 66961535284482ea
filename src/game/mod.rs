// Game layer: entities, dialogue, cutscenes and the per-frame state machine

pub mod animation;
pub mod cutscene;
pub mod dialogue;
pub mod level;
pub mod objects;
pub mod prototypes;
pub mod state;

pub use level::{EntityDescriptor, Level, LevelDescriptor};
pub use prototypes::Prototypes;
pub use state::{GameMode, GameState};
