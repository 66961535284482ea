// A single timed step of a cutscene

use super::hook::HookCommand;
use crate::game::dialogue::TextBox;

/// One cue: how long it lasts at least, an optional dialogue, whether it
/// moves on by itself, and what each actor does while it plays
#[derive(Debug, Clone, Default)]
pub struct CutSceneCue {
    pub period_ms: u32,
    pub textbox: Option<TextBox>,
    /// Advance without waiting for the player
    pub autocontinue: bool,
    /// Actor name and the commands run on its entities, in order
    pub hooks: Vec<(String, Vec<HookCommand>)>,
}

impl CutSceneCue {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            ..Self::default()
        }
    }

    pub fn with_textbox(mut self, textbox: TextBox) -> Self {
        self.textbox = Some(textbox);
        self
    }

    pub fn autocontinue(mut self, autocontinue: bool) -> Self {
        self.autocontinue = autocontinue;
        self
    }

    /// Queue a command for `actor`, after any already queued for it
    pub fn with_hook(mut self, actor: impl Into<String>, command: HookCommand) -> Self {
        let actor = actor.into();
        match self.hooks.iter_mut().find(|(name, _)| *name == actor) {
            Some((_, commands)) => commands.push(command),
            None => self.hooks.push((actor, vec![command])),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_group_by_actor() {
        let cue = CutSceneCue::new(500)
            .with_hook("guard", HookCommand::Move { dx: 1, dy: 0 })
            .with_hook("cat", HookCommand::Move { dx: 0, dy: 1 })
            .with_hook("guard", HookCommand::Move { dx: 2, dy: 0 });

        assert_eq!(cue.period_ms, 500);
        assert_eq!(cue.hooks.len(), 2);
        assert_eq!(cue.hooks[0].0, "guard");
        assert_eq!(cue.hooks[0].1.len(), 2);
        assert!(!cue.autocontinue);
        assert!(cue.textbox.is_none());
    }
}
