// Entity prototypes: how each kind named in a level file is put together

use crate::engine::assets::{grid, AssetManager};
use crate::game::animation::Animator;
use crate::game::level::EntityDescriptor;
use crate::game::objects::{GameObjectBuilder, GameObject, RectMode};
use crate::math::Rect;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt;

/// Spritesheet of the stock player character
pub const PLAYER_SHEET: &str = "mr_pynepple_64.png";

/// Cells of the player sheet: 64px frames, four per row, 18 in use
const PLAYER_FRAME_SIZE: u32 = 64;
const PLAYER_SHEET_COLUMNS: u32 = 4;
const PLAYER_SHEET_ROWS: u32 = 5;
const PLAYER_FRAME_COUNT: usize = 18;

/// Animations of the stock player, as indices into its cut frames. Idling
/// down comes first so it is what the player starts with.
const PLAYER_ANIMATIONS: [(&str, &[usize]); 8] = [
    ("idling_down", &[0, 4, 5, 4]),
    ("idling_up", &[2]),
    ("idling_left", &[3, 8, 9, 8]),
    ("idling_right", &[1, 6, 7, 6]),
    ("walking_down", &[10, 0, 11, 0]),
    ("walking_up", &[14, 2, 15, 2]),
    ("walking_left", &[16, 3, 17, 3]),
    ("walking_right", &[12, 1, 13, 1]),
];

/// Footprint of the stock player, relative to its sprite
const PLAYER_FOOT: Rect = Rect::new(18, 59, 28, 5);

pub type SpawnFn = Box<dyn Fn(&mut AssetManager, &EntityDescriptor) -> Result<GameObjectBuilder>>;

/// Maps entity kinds to the code that builds them
#[derive(Default)]
pub struct Prototypes {
    spawners: HashMap<String, SpawnFn>,
}

impl Prototypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The kinds every level can use: `player` and `prop`
    pub fn stock() -> Self {
        let mut prototypes = Self::new();
        prototypes.register("player", spawn_player);
        prototypes.register("prop", spawn_prop);
        prototypes
    }

    pub fn register<F>(&mut self, kind: impl Into<String>, spawn: F)
    where
        F: Fn(&mut AssetManager, &EntityDescriptor) -> Result<GameObjectBuilder> + 'static,
    {
        self.spawners.insert(kind.into(), Box::new(spawn));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.spawners.contains_key(kind)
    }

    /// Start building an entity of `descriptor.kind`. Position, dialogue
    /// and children are left to the caller.
    pub fn spawn(
        &self,
        assets: &mut AssetManager,
        descriptor: &EntityDescriptor,
    ) -> Result<GameObjectBuilder> {
        let spawn = self
            .spawners
            .get(&descriptor.kind)
            .ok_or_else(|| anyhow!("unknown entity kind '{}'", descriptor.kind))?;
        spawn(assets, descriptor)
    }
}

impl fmt::Debug for Prototypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.spawners.keys().collect();
        kinds.sort();
        f.debug_struct("Prototypes").field("kinds", &kinds).finish()
    }
}

fn spawn_player(assets: &mut AssetManager, descriptor: &EntityDescriptor) -> Result<GameObjectBuilder> {
    let sheet_name = descriptor.image.as_deref().unwrap_or(PLAYER_SHEET);
    let sheet = assets.load_image(sheet_name)?;

    let mut cuts = grid(
        PLAYER_FRAME_SIZE,
        PLAYER_FRAME_SIZE,
        PLAYER_SHEET_COLUMNS,
        PLAYER_SHEET_ROWS,
    );
    cuts.truncate(PLAYER_FRAME_COUNT);

    let animations = PLAYER_ANIMATIONS
        .iter()
        .map(|(name, frames)| (*name, frames.to_vec()));
    let animator = Animator::new(animations, &[sheet], &cuts)?;

    Ok(GameObject::builder(descriptor.display_name())
        .animator(animator)
        .rect_mode(RectMode::FootCollider, PLAYER_FOOT)
        .movable(true))
}

fn spawn_prop(assets: &mut AssetManager, descriptor: &EntityDescriptor) -> Result<GameObjectBuilder> {
    let mut builder = GameObject::builder(descriptor.display_name());
    if let Some(name) = &descriptor.image {
        builder = builder.image(assets.load_image(name)?);
    }
    if let Some(height) = descriptor.base_height {
        builder = builder.base_height(height);
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn descriptor(kind: &str) -> EntityDescriptor {
        EntityDescriptor {
            kind: kind.to_string(),
            ..EntityDescriptor::default()
        }
    }

    #[test]
    fn test_stock_player() {
        let mut assets = AssetManager::new("unused");
        assets.insert_image(PLAYER_SHEET, RgbaImage::from_pixel(256, 320, Rgba([0, 200, 0, 255])));

        let player = Prototypes::stock()
            .spawn(&mut assets, &descriptor("player"))
            .unwrap()
            .build();

        assert!(player.can_move());
        assert_eq!(player.name(), "player");
        assert_eq!(player.mode_rect(&RectMode::FootCollider), Some(PLAYER_FOOT));
        let animator = player.animator().unwrap();
        assert_eq!(animator.current_animation(), "idling_down");
        assert_eq!(animator.animations().len(), 8);
        assert!(animator.has_animation("walking_left"));
        assert_eq!(player.image().dimensions(), (64, 64));
    }

    #[test]
    fn test_player_sheet_too_small() {
        let mut assets = AssetManager::new("unused");
        assets.insert_image(PLAYER_SHEET, RgbaImage::new(256, 128));
        assert!(Prototypes::stock().spawn(&mut assets, &descriptor("player")).is_err());
    }

    #[test]
    fn test_prop_and_unknown_kind() {
        let mut assets = AssetManager::new("unused");
        let prototypes = Prototypes::stock();

        let prop = prototypes.spawn(&mut assets, &descriptor("prop")).unwrap().build();
        assert!(!prop.can_move());
        assert!(!prop.can_interact());

        let err = prototypes.spawn(&mut assets, &descriptor("dragon")).unwrap_err();
        assert!(err.to_string().contains("dragon"));
    }

    #[test]
    fn test_custom_kind() {
        let mut prototypes = Prototypes::new();
        prototypes.register("boulder", |_, descriptor| {
            Ok(GameObject::builder(descriptor.display_name()).base_height(10))
        });
        assert!(prototypes.contains("boulder"));
        assert_eq!(format!("{:?}", prototypes), r#"Prototypes { kinds: ["boulder"] }"#);
    }
}
