// Engine error taxonomy
//
// Every variant signals a content or programming bug, not a transient
// condition. Nothing in the engine retries; errors surface to the frame driver.

use crate::game::objects::{EntityId, RectMode};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed animation, frame map, dialogue or configuration data
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("'{0}' is not an existing animation")]
    UnknownAnimation(String),

    #[error("Page {index} does not exist (page list has {len} pages)")]
    UnknownPage { index: usize, len: usize },

    #[error("Rect mode {0} is not defined for this object")]
    UnknownRectMode(RectMode),

    #[error("Cannot play a cutscene without any cues")]
    EmptyCutScene,

    #[error("Cue '{0}' is listed but was never defined")]
    UnknownCue(String),

    #[error("Actor '{0}' is not part of this cutscene")]
    UnknownActor(String),

    #[error("No custom hook registered under '{0}'")]
    UnknownHook(String),

    #[error("Entity {0} is not a member of this group")]
    UnknownEntity(EntityId),
}

impl EngineError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
