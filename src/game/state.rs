// Top-level game state: free play and cutscenes, one step per frame

use crate::engine::config::EngineConfig;
use crate::engine::error::{EngineError, Result};
use crate::engine::input::InputState;
use crate::engine::renderer::{Camera, MonospaceMetrics, RenderList, TextSurface};
use crate::game::cutscene::{CutScene, CutSceneCue, HookTable};
use crate::game::dialogue::TextBox;
use crate::game::level::Level;
use crate::game::objects::{EntityId, GameGroup, Player, PlayerEvent};
use std::collections::HashSet;

/// Name of the single cue of a chat cutscene
const CHAT_CUE: &str = "chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// The player walks around
    Playing,
    /// A cutscene has the controls
    Cinematic,
}

#[derive(Debug)]
pub struct GameState {
    config: EngineConfig,
    mode: GameMode,
    world: GameGroup,
    dynamic: Vec<EntityId>,
    statics: HashSet<EntityId>,
    interactable: HashSet<EntityId>,
    player: Player,
    camera: Camera,
    cutscene: Option<CutScene>,
    hooks: HookTable,
    metrics: MonospaceMetrics,
}

impl GameState {
    pub fn new(config: EngineConfig, level: Level) -> Result<Self> {
        let player_id = level
            .player
            .ok_or_else(|| EngineError::config("level has no player"))?;
        if !level.world.contains(player_id) {
            return Err(EngineError::UnknownEntity(player_id));
        }

        let (width, height) = config.screen_size;
        let camera = Camera::new(width as i32, height as i32, config.scroll_margin);
        let player = Player::new(player_id, config.player.clone());

        Ok(Self {
            mode: GameMode::Playing,
            world: level.world,
            dynamic: level.dynamic,
            statics: level.statics,
            interactable: level.interactable,
            player,
            camera,
            cutscene: None,
            hooks: HookTable::new(),
            metrics: MonospaceMetrics::default(),
            config,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn world(&self) -> &GameGroup {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameGroup {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn cutscene(&self) -> Option<&CutScene> {
        self.cutscene.as_ref()
    }

    /// Custom hooks available to every cutscene
    pub fn hooks_mut(&mut self) -> &mut HookTable {
        &mut self.hooks
    }

    /// Run one frame and return what to show
    pub fn step(&mut self, delta_ms: u32, input: &InputState) -> Result<RenderList> {
        match self.mode {
            GameMode::Playing => self.update_world(delta_ms, input)?,
            GameMode::Cinematic => self.update_cutscene(delta_ms, input)?,
        }

        let mut frame = RenderList::new();
        self.draw(&mut frame);
        Ok(frame)
    }

    fn update_world(&mut self, delta_ms: u32, input: &InputState) -> Result<()> {
        let mut event = None;
        for &id in &self.dynamic {
            if id == self.player.id() {
                event = self.player.update(
                    delta_ms,
                    input,
                    &mut self.world,
                    &self.statics,
                    &self.interactable,
                )?;
            } else {
                self.world
                    .get_mut(id)
                    .ok_or(EngineError::UnknownEntity(id))?
                    .update(delta_ms)?;
            }
        }

        if let Some(PlayerEvent::Chat(id)) = event {
            self.start_chat(id)?;
        }

        let body = self
            .world
            .get(self.player.id())
            .ok_or(EngineError::UnknownEntity(self.player.id()))?;
        let scroll = self.camera.follow(self.world.offset(), &body.render_rect());
        if scroll.x != 0 || scroll.y != 0 {
            log::trace!("Camera scrolls by {:?}", scroll);
            self.world.scroll(scroll.x, scroll.y);
        }
        Ok(())
    }

    fn update_cutscene(&mut self, delta_ms: u32, input: &InputState) -> Result<()> {
        let Some(cutscene) = self.cutscene.as_mut() else {
            log::warn!("Cinematic mode without a cutscene, back to playing");
            self.mode = GameMode::Playing;
            return Ok(());
        };

        cutscene.update(delta_ms, input, &mut self.world, &self.hooks)?;
        if cutscene.is_finished() {
            self.cutscene = None;
            self.mode = GameMode::Playing;
            self.player.reset_chat_cooldown();
            log::info!("Cutscene over, back to playing");
        }
        Ok(())
    }

    /// Open a conversation with `id`, shown as a one-cue cutscene
    fn start_chat(&mut self, id: EntityId) -> Result<()> {
        let object = self.world.get(id).ok_or(EngineError::UnknownEntity(id))?;
        let Some(pages) = object.dialogue() else {
            log::debug!("{} has nothing to say", object.name());
            return Ok(());
        };
        log::debug!("Chatting with {} ({})", object.name(), id);

        let textbox = TextBox::new(pages.to_vec(), self.config.textbox.clone())?;
        let mut cutscene = CutScene::new([CHAT_CUE]);
        cutscene.edit_cue(CHAT_CUE, CutSceneCue::new(0).with_textbox(textbox));
        self.play_cutscene(cutscene)
    }

    /// Hand the controls to `cutscene` until it finishes
    pub fn play_cutscene(&mut self, mut cutscene: CutScene) -> Result<()> {
        cutscene.start()?;
        self.cutscene = Some(cutscene);
        self.mode = GameMode::Cinematic;
        log::info!("Entering cinematic mode");
        Ok(())
    }

    /// Background, visible world members back to front, then any dialogue
    pub fn draw<S: TextSurface>(&self, surface: &mut S) {
        surface.fill(self.config.background);
        let viewport = self.camera.viewport(self.world.offset());
        self.world.draw_visible(surface, &viewport);
        if let Some(cutscene) = &self.cutscene {
            cutscene.draw(surface, &self.metrics);
        }
    }
}
