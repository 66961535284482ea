// Game objects: positioned, optionally animated sprites that own child objects

use super::group::GameGroup;
use crate::engine::error::{EngineError, Result};
use crate::engine::renderer::{Surface, WHITE};
use crate::game::animation::Animator;
use crate::game::cutscene::{HookCommand, HookTable};
use crate::game::dialogue::TextBoxPage;
use crate::math::Rect;
use glam::IVec2;
use image::{Rgba, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Size of the placeholder block used when an object has no image
pub const FALLBACK_IMAGE_SIZE: u32 = 128;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of an object's rectangles is currently presented as its `rect`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RectMode {
    /// Everything the composited image covers, children included
    Renderer,
    /// The object's own sprite
    Base,
    /// Footprint other objects bump into
    Collider,
    /// Footprint used when this object walks into others
    FootCollider,
    Named(String),
}

impl fmt::Display for RectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renderer => write!(f, "renderer"),
            Self::Base => write!(f, "base"),
            Self::Collider => write!(f, "collider"),
            Self::FootCollider => write!(f, "foot_collider"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for RectMode {
    fn from(name: &str) -> Self {
        match name {
            "renderer" => Self::Renderer,
            "base" => Self::Base,
            "collider" => Self::Collider,
            "foot_collider" => Self::FootCollider,
            other => Self::Named(other.to_string()),
        }
    }
}

/// Things the player can do to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Chat,
}

/// A positioned sprite in the world.
///
/// Each object keeps a table of rectangles relative to its logical origin,
/// one per [`RectMode`]. `rect` is the world-space rectangle of the current
/// mode, so `rect.position() == origin + mode_rect.position()` always holds.
#[derive(Debug)]
pub struct GameObject {
    id: EntityId,
    name: String,
    rect: Rect,
    rect_modes: HashMap<RectMode, Rect>,
    current_mode: RectMode,
    animator: Option<Animator>,
    children: GameGroup,
    /// The object's own frame
    sprite: Arc<RgbaImage>,
    /// Sprite with children composited on top
    image: Arc<RgbaImage>,
    interactions: HashSet<Interaction>,
    can_move: bool,
    can_interact: bool,
    dialogue: Option<Vec<TextBoxPage>>,
}

impl GameObject {
    pub fn builder(name: impl Into<String>) -> GameObjectBuilder {
        GameObjectBuilder::new(name)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World rectangle of the current mode
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    /// Translate the object, children included
    pub fn move_by(&mut self, delta: IVec2) {
        self.rect.move_by(delta);
    }

    pub fn current_mode(&self) -> &RectMode {
        &self.current_mode
    }

    pub fn has_mode(&self, mode: &RectMode) -> bool {
        self.rect_modes.contains_key(mode)
    }

    /// Origin-relative rectangle for `mode`
    pub fn mode_rect(&self, mode: &RectMode) -> Option<Rect> {
        self.rect_modes.get(mode).copied()
    }

    fn current_offset(&self) -> IVec2 {
        self.rect_modes
            .get(&self.current_mode)
            .map(Rect::position)
            .unwrap_or(IVec2::ZERO)
    }

    /// The logical origin all mode rectangles hang off
    pub fn origin(&self) -> IVec2 {
        self.rect.position() - self.current_offset()
    }

    /// World rectangle `mode` would have, without switching to it
    pub fn rect_in_mode(&self, mode: &RectMode) -> Option<Rect> {
        let origin = self.origin();
        self.mode_rect(mode).map(|rect| rect.translated(origin))
    }

    /// Where the composited image goes in world space
    pub fn render_rect(&self) -> Rect {
        self.rect_in_mode(&RectMode::Renderer)
            .unwrap_or_else(|| Rect::from_pos_size(self.origin(), self.image_size()))
    }

    /// Present a different rectangle as `rect`. Translates by the difference
    /// between the two mode offsets and takes the new mode's size.
    pub fn select_rect(&mut self, mode: &RectMode) -> Result<()> {
        if *mode == self.current_mode {
            return Ok(());
        }
        let target = self
            .mode_rect(mode)
            .ok_or_else(|| EngineError::UnknownRectMode(mode.clone()))?;

        let origin = self.origin();
        self.rect = target.translated(origin);
        self.current_mode = mode.clone();
        Ok(())
    }

    /// Define or replace a mode rectangle, keeping the origin in place
    pub fn set_rect_mode(&mut self, mode: RectMode, rect: Rect) {
        let origin = self.origin();
        let is_current = mode == self.current_mode;
        self.rect_modes.insert(mode, rect);
        if is_current {
            self.rect = rect.translated(origin);
        }
    }

    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    /// Switch animation and show its current frame. Objects without an
    /// animator have nothing to play.
    pub fn play(&mut self, name: &str, reset: bool) -> Result<()> {
        let Some(animator) = self.animator.as_mut() else {
            return Err(EngineError::UnknownAnimation(name.to_string()));
        };
        self.sprite = Arc::clone(animator.play(name, reset)?);
        Ok(())
    }

    pub fn children(&self) -> &GameGroup {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut GameGroup {
        &mut self.children
    }

    /// The composited image drawn for this object
    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    pub fn sprite(&self) -> &Arc<RgbaImage> {
        &self.sprite
    }

    fn image_size(&self) -> IVec2 {
        IVec2::new(self.image.width() as i32, self.image.height() as i32)
    }

    pub fn offers(&self, interaction: Interaction) -> bool {
        self.interactions.contains(&interaction)
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn can_interact(&self) -> bool {
        self.can_interact
    }

    /// Pages shown when the player chats with this object
    pub fn dialogue(&self) -> Option<&[TextBoxPage]> {
        self.dialogue.as_deref()
    }

    /// Smallest parent-local rectangle covering the own sprite and every
    /// child. Children may stick out on any side.
    pub fn render_bounding_box(&self) -> Rect {
        let base = self.mode_rect(&RectMode::Base).unwrap_or_default();
        self.children
            .iter()
            .fold(base, |bounds, child| bounds.union(&child.render_rect()))
    }

    /// Composite the sprite and children into `image` and make the
    /// renderer rectangle current. Children must already be up to date.
    pub fn prepare_for_render(&mut self) {
        let bounds = self.render_bounding_box();
        let base = self.mode_rect(&RectMode::Base).unwrap_or_default();
        let origin = self.origin();

        self.rect_modes.insert(RectMode::Renderer, bounds);
        self.current_mode = RectMode::Renderer;
        self.rect = bounds.translated(origin);

        let sprite_size = IVec2::new(self.sprite.width() as i32, self.sprite.height() as i32);
        if self.children.is_empty() && bounds.position() == IVec2::ZERO && bounds.size() == sprite_size
        {
            self.image = Arc::clone(&self.sprite);
            return;
        }

        let mut canvas = RgbaImage::new(bounds.w.max(1) as u32, bounds.h.max(1) as u32);
        canvas.blit(&self.sprite, base.position() - bounds.position());
        let offset = self.children.offset() + bounds.position();
        self.children.draw_with_offset(&mut canvas, offset);
        self.image = Arc::new(canvas);
    }

    /// Advance one frame: animation, children, then compositing
    pub fn update(&mut self, delta_ms: u32) -> Result<()> {
        self.select_rect(&RectMode::Base)?;
        if let Some(animator) = self.animator.as_mut() {
            self.sprite = Arc::clone(animator.advance(delta_ms));
        }
        self.children.update(delta_ms)?;
        self.prepare_for_render();
        Ok(())
    }

    /// Run one scripted command against this object
    pub fn apply_hook(&mut self, command: &HookCommand, hooks: &HookTable) -> Result<()> {
        match command {
            HookCommand::Move { dx, dy } => {
                self.move_by(IVec2::new(*dx, *dy));
                Ok(())
            }
            HookCommand::PlayAnimation { name, reset } => self.play(name, *reset),
            HookCommand::SelectRect(mode) => self.select_rect(mode),
            HookCommand::Custom { id, args } => {
                let handler = hooks
                    .get(id)
                    .ok_or_else(|| EngineError::UnknownHook(id.clone()))?;
                handler(self, args.as_slice())
            }
        }
    }
}

/// Step-by-step construction of a [`GameObject`]
#[derive(Debug)]
pub struct GameObjectBuilder {
    name: String,
    position: IVec2,
    rect_modes: HashMap<RectMode, Rect>,
    animator: Option<Animator>,
    image: Option<Arc<RgbaImage>>,
    base_height: Option<i32>,
    interactions: HashSet<Interaction>,
    can_move: bool,
    can_interact: bool,
    dialogue: Option<Vec<TextBoxPage>>,
    children: Vec<GameObject>,
}

impl GameObjectBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: IVec2::ZERO,
            rect_modes: HashMap::new(),
            animator: None,
            image: None,
            base_height: None,
            interactions: HashSet::new(),
            can_move: false,
            can_interact: false,
            dialogue: None,
            children: Vec::new(),
        }
    }

    /// Spawn position of the logical origin
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = IVec2::new(x, y);
        self
    }

    pub fn rect_mode(mut self, mode: RectMode, rect: Rect) -> Self {
        self.rect_modes.insert(mode, rect);
        self
    }

    pub fn animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn image(mut self, image: Arc<RgbaImage>) -> Self {
        self.image = Some(image);
        self
    }

    /// Height of the default collider strip at the bottom of the sprite
    pub fn base_height(mut self, height: i32) -> Self {
        self.base_height = Some(height);
        self
    }

    pub fn interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.insert(interaction);
        self
    }

    pub fn movable(mut self, can_move: bool) -> Self {
        self.can_move = can_move;
        self
    }

    pub fn interactable(mut self, can_interact: bool) -> Self {
        self.can_interact = can_interact;
        self
    }

    /// Chat pages; also makes the object offer [`Interaction::Chat`]
    pub fn dialogue(mut self, pages: Vec<TextBoxPage>) -> Self {
        self.dialogue = Some(pages);
        self.interactions.insert(Interaction::Chat);
        self.can_interact = true;
        self
    }

    pub fn child(mut self, child: GameObject) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> GameObject {
        let sprite = self
            .image
            .or_else(|| self.animator.as_ref().map(|a| Arc::clone(a.current_frame())))
            .unwrap_or_else(fallback_image);

        let mut rect_modes = self.rect_modes;
        let base = *rect_modes
            .entry(RectMode::Base)
            .or_insert_with(|| Rect::new(0, 0, sprite.width() as i32, sprite.height() as i32));
        rect_modes.entry(RectMode::Renderer).or_insert(base);
        rect_modes.entry(RectMode::Collider).or_insert_with(|| {
            let height = self.base_height.unwrap_or(base.h / 4);
            Rect::new(base.x, base.bottom() - height, base.w, height)
        });

        let mut children = GameGroup::new();
        for child in self.children {
            children.add(child);
        }

        let mut object = GameObject {
            id: EntityId::next(),
            name: self.name,
            rect: base.translated(self.position),
            rect_modes,
            current_mode: RectMode::Base,
            animator: self.animator,
            children,
            image: Arc::clone(&sprite),
            sprite,
            interactions: self.interactions,
            can_move: self.can_move,
            can_interact: self.can_interact,
            dialogue: self.dialogue,
        };

        if !object.children.is_empty() {
            // Objects that never update still need their composite
            object.prepare_for_render();
            object.current_mode = RectMode::Base;
            object.rect = base.translated(self.position);
        }
        object
    }
}

fn fallback_image() -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(
        FALLBACK_IMAGE_SIZE,
        FALLBACK_IMAGE_SIZE,
        Rgba(WHITE),
    ))
}
