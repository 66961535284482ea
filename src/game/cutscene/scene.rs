// Cue sequencer

use super::cue::CutSceneCue;
use super::hook::HookTable;
use crate::engine::error::{EngineError, Result};
use crate::engine::input::{Action, InputState};
use crate::engine::renderer::{GlyphMetrics, TextSurface};
use crate::game::dialogue::TextBox;
use crate::game::objects::{EntityId, GameGroup};
use std::collections::HashMap;

/// Plays a list of cues in order.
///
/// A cue lasts at least its period. After that it moves on by itself when
/// marked `autocontinue`, or when the player presses interact, but never
/// before its dialogue is read to the end.
#[derive(Debug, Clone, Default)]
pub struct CutScene {
    cue_list: Vec<String>,
    cues: HashMap<String, CutSceneCue>,
    actors: HashMap<String, Vec<EntityId>>,
    cursor: Option<usize>,
    elapsed_ms: u32,
    finished: bool,
}

impl CutScene {
    pub fn new<I, S>(cue_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cue_list: cue_list.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Define or replace a cue
    pub fn edit_cue(&mut self, name: impl Into<String>, cue: CutSceneCue) {
        self.cues.insert(name.into(), cue);
    }

    pub fn cue_mut(&mut self, name: &str) -> Option<&mut CutSceneCue> {
        self.cues.get_mut(name)
    }

    /// Cast entities under an actor name. Entities already cast keep their
    /// place.
    pub fn add_actor<I>(&mut self, name: impl Into<String>, ids: I)
    where
        I: IntoIterator<Item = EntityId>,
    {
        let cast = self.actors.entry(name.into()).or_default();
        for id in ids {
            if !cast.contains(&id) {
                cast.push(id);
            }
        }
    }

    pub fn remove_actor(&mut self, name: &str) -> Option<Vec<EntityId>> {
        self.actors.remove(name)
    }

    pub fn actor(&self, name: &str) -> Option<&[EntityId]> {
        self.actors.get(name).map(Vec::as_slice)
    }

    /// Rewind to the first cue, checking every listed cue exists
    pub fn start(&mut self) -> Result<()> {
        if self.cue_list.is_empty() {
            return Err(EngineError::EmptyCutScene);
        }
        if let Some(missing) = self.cue_list.iter().find(|name| !self.cues.contains_key(*name)) {
            return Err(EngineError::UnknownCue(missing.clone()));
        }
        self.cursor = Some(0);
        self.elapsed_ms = 0;
        self.finished = false;
        log::debug!("Cutscene starts at cue '{}'", self.cue_list[0]);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_cue_name(&self) -> Option<&str> {
        self.cursor.map(|index| self.cue_list[index].as_str())
    }

    pub fn current_cue(&self) -> Option<&CutSceneCue> {
        self.current_cue_name().and_then(|name| self.cues.get(name))
    }

    fn current_cue_mut(&mut self) -> Option<&mut CutSceneCue> {
        let name = self.cue_list.get(self.cursor?)?;
        self.cues.get_mut(name)
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Advance one frame. Starts the scene on first use.
    pub fn update(
        &mut self,
        delta_ms: u32,
        input: &InputState,
        world: &mut GameGroup,
        hooks: &HookTable,
    ) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        if self.cursor.is_none() {
            self.start()?;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        let elapsed_ms = self.elapsed_ms;
        let Some(cue) = self.current_cue_mut() else {
            return Ok(());
        };
        if let Some(textbox) = cue.textbox.as_mut() {
            textbox.update(delta_ms);
        }

        let ready = elapsed_ms >= cue.period_ms
            && (cue.autocontinue || input.just_pressed(Action::Interact))
            && cue.textbox.as_ref().map_or(true, TextBox::finished);
        if ready {
            let overshoot = elapsed_ms - cue.period_ms;
            if !self.advance(overshoot) {
                return Ok(());
            }
        } else if let Some(textbox) = cue.textbox.as_mut() {
            forward_input(textbox, input);
        }

        self.run_hooks(world, hooks)
    }

    /// Move to the next cue. Returns false once the scene is over.
    fn advance(&mut self, overshoot_ms: u32) -> bool {
        let next = self.cursor.map_or(0, |index| index + 1);
        if next >= self.cue_list.len() {
            self.finished = true;
            log::debug!("Cutscene finished");
            return false;
        }

        self.cursor = Some(next);
        let name = &self.cue_list[next];
        let has_textbox = self
            .cues
            .get(name)
            .map_or(false, |cue| cue.textbox.is_some());
        self.elapsed_ms = if has_textbox { 0 } else { overshoot_ms };
        log::debug!("Cutscene moves on to cue '{}'", name);
        true
    }

    fn run_hooks(&self, world: &mut GameGroup, hooks: &HookTable) -> Result<()> {
        let Some(cue) = self.current_cue() else {
            return Ok(());
        };
        for (actor, commands) in &cue.hooks {
            let cast = self
                .actors
                .get(actor)
                .ok_or_else(|| EngineError::UnknownActor(actor.clone()))?;
            for &id in cast {
                let object = world.get_mut(id).ok_or(EngineError::UnknownEntity(id))?;
                for command in commands {
                    object.apply_hook(command, hooks)?;
                }
            }
        }
        Ok(())
    }

    /// Draw the dialogue of the active cue, if any
    pub fn draw<S: TextSurface>(&self, surface: &mut S, metrics: &dyn GlyphMetrics) {
        if self.finished {
            return;
        }
        if let Some(textbox) = self.current_cue().and_then(|cue| cue.textbox.as_ref()) {
            textbox.draw(surface, metrics);
        }
    }
}

fn forward_input(textbox: &mut TextBox, input: &InputState) {
    if textbox.is_choosing() {
        if input.just_pressed(Action::Choose) {
            textbox.make_choice();
        } else if input.just_pressed(Action::MoveLeft) {
            textbox.prev_choice();
        } else if input.just_pressed(Action::MoveRight) {
            textbox.next_choice();
        }
    } else if input.just_pressed(Action::Interact) {
        if !textbox.showing_full_page() {
            textbox.show_full_page();
        } else if !textbox.finished() {
            textbox.next_page();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::TextBoxConfig;
    use crate::game::cutscene::HookCommand;
    use crate::game::dialogue::TextBoxPage;
    use crate::game::objects::GameObject;

    fn press(action: Action) -> InputState {
        let mut input = InputState::new();
        input.press(action);
        input
    }

    fn walking_scene(world: &mut GameGroup) -> (CutScene, EntityId) {
        let guard = GameObject::builder("guard").build();
        let id = guard.id();
        world.add(guard);

        let mut scene = CutScene::new(["walk", "wait"]);
        scene.edit_cue(
            "walk",
            CutSceneCue::new(100)
                .autocontinue(true)
                .with_hook("guard", HookCommand::Move { dx: 2, dy: 0 }),
        );
        scene.edit_cue("wait", CutSceneCue::new(100));
        scene.add_actor("guard", [id, id]);
        (scene, id)
    }

    #[test]
    fn test_start_errors() {
        let mut empty = CutScene::default();
        assert!(matches!(empty.start(), Err(EngineError::EmptyCutScene)));

        let mut scene = CutScene::new(["intro", "outro"]);
        scene.edit_cue("intro", CutSceneCue::new(0));
        assert!(matches!(
            scene.start(),
            Err(EngineError::UnknownCue(name)) if name == "outro"
        ));
    }

    #[test]
    fn test_actors_are_deduplicated() {
        let mut world = GameGroup::new();
        let (mut scene, id) = walking_scene(&mut world);
        assert_eq!(scene.actor("guard"), Some(&[id][..]));
        assert_eq!(scene.remove_actor("guard"), Some(vec![id]));
        assert!(scene.actor("guard").is_none());
    }

    #[test]
    fn test_hooks_run_every_frame_and_overshoot_carries() {
        let mut world = GameGroup::new();
        let (mut scene, id) = walking_scene(&mut world);
        let hooks = HookTable::new();
        let idle = InputState::new();

        scene.update(60, &idle, &mut world, &hooks).unwrap();
        assert_eq!(scene.current_cue_name(), Some("walk"));
        assert_eq!(world.get(id).unwrap().rect().x, 2);

        scene.update(60, &idle, &mut world, &hooks).unwrap();
        assert_eq!(scene.current_cue_name(), Some("wait"));
        assert_eq!(scene.elapsed_ms(), 20);
        // "wait" has no hooks for the guard
        assert_eq!(world.get(id).unwrap().rect().x, 2);

        // Without autocontinue the cue waits for the player
        scene.update(500, &idle, &mut world, &hooks).unwrap();
        assert_eq!(scene.current_cue_name(), Some("wait"));
        scene.update(0, &press(Action::Interact), &mut world, &hooks).unwrap();
        assert!(scene.is_finished());

        // Finished scenes stay finished
        scene.update(100, &idle, &mut world, &hooks).unwrap();
        assert!(scene.is_finished());
    }

    #[test]
    fn test_dialogue_holds_the_cue() {
        let mut world = GameGroup::new();
        let textbox = TextBox::new(
            vec![TextBoxPage::new("Halt!"), TextBoxPage::new("Who goes there?")],
            TextBoxConfig::default(),
        )
        .unwrap();
        let mut scene = CutScene::new(["talk"]);
        scene.edit_cue("talk", CutSceneCue::new(0).with_textbox(textbox));
        let hooks = HookTable::new();
        let interact = press(Action::Interact);

        // First press reveals the page
        scene.update(10, &interact, &mut world, &hooks).unwrap();
        let textbox = scene.current_cue().unwrap().textbox.as_ref().unwrap();
        assert!(textbox.showing_full_page());

        // Past the resting period, the next press turns the page
        scene.update(1_000, &interact, &mut world, &hooks).unwrap();
        let textbox = scene.current_cue().unwrap().textbox.as_ref().unwrap();
        assert_eq!(textbox.current_page(), 1);
        assert!(!scene.is_finished());

        scene.update(5_000, &InputState::new(), &mut world, &hooks).unwrap();
        assert!(!scene.is_finished());
        scene.update(10, &interact, &mut world, &hooks).unwrap();
        assert!(scene.is_finished());
    }

    #[test]
    fn test_press_right_after_reveal_does_not_close_dialogue() {
        let mut world = GameGroup::new();
        let textbox = TextBox::new(vec![TextBoxPage::new("Hi")], TextBoxConfig::default()).unwrap();
        let mut scene = CutScene::new(["greet"]);
        scene.edit_cue("greet", CutSceneCue::new(0).with_textbox(textbox));
        let hooks = HookTable::new();
        let interact = press(Action::Interact);

        scene.update(10, &interact, &mut world, &hooks).unwrap();
        assert!(scene.current_cue().unwrap().textbox.as_ref().unwrap().showing_full_page());

        // The page is still resting, so this press is swallowed
        scene.update(33, &interact, &mut world, &hooks).unwrap();
        assert!(!scene.is_finished());

        scene.update(1_000, &interact, &mut world, &hooks).unwrap();
        assert!(scene.is_finished());
    }

    #[test]
    fn test_choices_follow_left_right_and_choose() {
        let mut world = GameGroup::new();
        let root = TextBoxPage::new("Tea?")
            .with_choice("Yes", vec![TextBoxPage::new("Here you go.")])
            .with_choice("No", vec![TextBoxPage::new("Suit yourself.")]);
        let textbox = TextBox::new(vec![root], TextBoxConfig::default()).unwrap();
        let mut scene = CutScene::new(["offer"]);
        scene.edit_cue("offer", CutSceneCue::new(0).with_textbox(textbox));
        let hooks = HookTable::new();

        scene.update(5_000, &InputState::new(), &mut world, &hooks).unwrap();
        scene.update(0, &press(Action::MoveRight), &mut world, &hooks).unwrap();
        scene.update(0, &press(Action::Choose), &mut world, &hooks).unwrap();

        let textbox = scene.current_cue().unwrap().textbox.as_ref().unwrap();
        assert_eq!(textbox.page().text, "Suit yourself.");
    }

    #[test]
    fn test_unknown_actor_and_entity() {
        let mut world = GameGroup::new();
        let hooks = HookTable::new();
        let mut scene = CutScene::new(["only"]);
        scene.edit_cue(
            "only",
            CutSceneCue::new(1_000).with_hook("ghost", HookCommand::Move { dx: 1, dy: 1 }),
        );
        let err = scene.update(0, &InputState::new(), &mut world, &hooks).unwrap_err();
        assert!(matches!(err, EngineError::UnknownActor(name) if name == "ghost"));

        let stranger = GameObject::builder("stranger").build();
        scene.add_actor("ghost", [stranger.id()]);
        let err = scene.update(0, &InputState::new(), &mut world, &hooks).unwrap_err();
        assert!(matches!(err, EngineError::UnknownEntity(id) if id == stranger.id()));
    }

    #[test]
    fn test_custom_hook_lookup() {
        let mut world = GameGroup::new();
        let extra = GameObject::builder("extra").build();
        let id = extra.id();
        world.add(extra);

        let mut scene = CutScene::new(["wave"]);
        scene.edit_cue(
            "wave",
            CutSceneCue::new(1_000).with_hook(
                "extra",
                HookCommand::Custom { id: "wave".into(), args: Vec::new() },
            ),
        );
        scene.add_actor("extra", [id]);

        let err = scene
            .update(0, &InputState::new(), &mut world, &HookTable::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownHook(name) if name == "wave"));
    }
}
