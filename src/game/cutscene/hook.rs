// Scripted commands that cutscenes run against their actors

use crate::engine::error::Result;
use crate::game::objects::{GameObject, RectMode};
use std::collections::HashMap;
use std::fmt;

/// Argument passed to a custom hook
#[derive(Debug, Clone, PartialEq)]
pub enum HookArg {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// One command applied to every entity of an actor, each frame its cue is
/// active
#[derive(Debug, Clone, PartialEq)]
pub enum HookCommand {
    /// Translate by this many pixels
    Move { dx: i32, dy: i32 },
    PlayAnimation { name: String, reset: bool },
    SelectRect(RectMode),
    /// Call a handler registered in the [`HookTable`]
    Custom { id: String, args: Vec<HookArg> },
}

pub type HookFn = Box<dyn Fn(&mut GameObject, &[HookArg]) -> Result<()>>;

/// Handlers for [`HookCommand::Custom`], looked up by id
#[derive(Default)]
pub struct HookTable {
    handlers: HashMap<String, HookFn>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one with the same id
    pub fn register<F>(&mut self, id: impl Into<String>, handler: F)
    where
        F: Fn(&mut GameObject, &[HookArg]) -> Result<()> + 'static,
    {
        self.handlers.insert(id.into(), Box::new(handler));
    }

    pub fn get(&self, id: &str) -> Option<&HookFn> {
        self.handlers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.handlers.keys().collect();
        ids.sort();
        f.debug_struct("HookTable").field("handlers", &ids).finish()
    }
}
