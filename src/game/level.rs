// Levels: entity descriptors loaded from TOML and the world they populate

use crate::engine::assets::{AssetLoader, AssetManager, AssetType};
use crate::engine::config::TextBoxConfig;
use crate::game::dialogue::DialogueDescriptor;
use crate::game::objects::{EntityId, GameGroup, GameObject};
use crate::game::prototypes::Prototypes;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
}

/// One entity of a level. Children are positioned relative to their parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Prototype to build the entity from
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: (i32, i32),
    /// Image asset, for kinds that take one
    #[serde(default)]
    pub image: Option<String>,
    /// Height of the collider strip
    #[serde(default)]
    pub base_height: Option<i32>,
    /// Dialogue asset shown when the player chats with the entity
    #[serde(default)]
    pub dialogue: Option<String>,
    #[serde(default)]
    pub children: Vec<EntityDescriptor>,
}

impl EntityDescriptor {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

impl LevelDescriptor {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let level = toml::from_str(content).context("malformed level")?;
        Ok(level)
    }

    /// Load `name` from the levels directory
    pub fn load(loader: &AssetLoader, name: &str) -> Result<Self> {
        let content = loader.load_text(AssetType::Level, name)?;
        Self::from_toml_str(&content).with_context(|| format!("in level {}", name))
    }
}

/// A populated world, with its members sorted by what they can do
#[derive(Debug, Default)]
pub struct Level {
    pub world: GameGroup,
    /// Members that update every frame, in world order
    pub dynamic: Vec<EntityId>,
    /// Members that never move; the player collides with these
    pub statics: HashSet<EntityId>,
    pub interactable: HashSet<EntityId>,
    /// First entity spawned from the `player` kind
    pub player: Option<EntityId>,
}

impl Level {
    pub fn populate(
        descriptor: &LevelDescriptor,
        prototypes: &Prototypes,
        assets: &mut AssetManager,
        textbox: &TextBoxConfig,
    ) -> Result<Self> {
        let mut level = Level::default();
        for entity in &descriptor.entities {
            let object = build_entity(entity, prototypes, assets, textbox)
                .with_context(|| format!("while building '{}'", entity.display_name()))?;
            let id = object.id();

            if object.can_move() {
                level.dynamic.push(id);
            } else {
                level.statics.insert(id);
            }
            if object.can_interact() {
                level.interactable.insert(id);
            }
            if entity.kind == "player" && level.player.is_none() {
                level.player = Some(id);
            }
            level.world.add(object);
        }

        log::info!(
            "Level populated: {} dynamic, {} static, {} interactable",
            level.dynamic.len(),
            level.statics.len(),
            level.interactable.len()
        );
        Ok(level)
    }
}

fn build_entity(
    descriptor: &EntityDescriptor,
    prototypes: &Prototypes,
    assets: &mut AssetManager,
    textbox: &TextBoxConfig,
) -> Result<GameObject> {
    let (x, y) = descriptor.position;
    let mut builder = prototypes.spawn(assets, descriptor)?.at(x, y);

    if let Some(name) = &descriptor.dialogue {
        let content = assets.loader().load_text(AssetType::Dialogue, name)?;
        let pages = DialogueDescriptor::from_toml_str(&content)
            .and_then(|dialogue| dialogue.build(textbox.default_cps))
            .with_context(|| format!("in dialogue {}", name))?;
        builder = builder.dialogue(pages);
    }

    for child in &descriptor.children {
        builder = builder.child(build_entity(child, prototypes, assets, textbox)?);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::PathBuf;

    const VILLAGE: &str = r#"
        [[entities]]
        kind = "player"
        position = [64, 64]

        [[entities]]
        kind = "prop"
        name = "well"
        image = "well.png"
        position = [200, 120]
        base_height = 12

        [[entities.children]]
        kind = "prop"
        name = "bucket"
        image = "bucket.png"
        position = [40, 20]
    "#;

    fn assets() -> AssetManager {
        let mut assets = AssetManager::new("unused");
        assets.insert_image("mr_pynepple_64.png", RgbaImage::new(256, 320));
        assets.insert_image("well.png", RgbaImage::from_pixel(48, 48, Rgba([90, 90, 90, 255])));
        assets.insert_image("bucket.png", RgbaImage::from_pixel(16, 16, Rgba([120, 60, 0, 255])));
        assets
    }

    #[test]
    fn test_parse_level() {
        let level = LevelDescriptor::from_toml_str(VILLAGE).unwrap();
        assert_eq!(level.entities.len(), 2);
        assert_eq!(level.entities[1].display_name(), "well");
        assert_eq!(level.entities[1].children[0].position, (40, 20));
        assert_eq!(level.entities[0].display_name(), "player");
    }

    #[test]
    fn test_populate_buckets_entities() {
        let descriptor = LevelDescriptor::from_toml_str(VILLAGE).unwrap();
        let level = Level::populate(
            &descriptor,
            &Prototypes::stock(),
            &mut assets(),
            &TextBoxConfig::default(),
        )
        .unwrap();

        let player = level.player.unwrap();
        assert_eq!(level.dynamic, vec![player]);
        assert_eq!(level.statics.len(), 1);
        assert!(level.interactable.is_empty());

        let well: &GameObject = level.world.iter().find(|o| o.name() == "well").unwrap();
        assert_eq!(well.children().len(), 1);
        // The bucket sticks out past the well's right edge
        assert_eq!(well.render_bounding_box().w, 56);
        assert_eq!(well.rect().position(), glam::IVec2::new(200, 120));
    }

    #[test]
    fn test_dialogue_makes_entities_interactable() {
        let root = std::env::temp_dir().join(format!("rusted-grove-level-{}", std::process::id()));
        let dialogue_dir: PathBuf = root.join("dialogue");
        fs::create_dir_all(&dialogue_dir).unwrap();
        fs::write(dialogue_dir.join("sign.toml"), "[[pages]]\ntext = \"Welcome to the grove.\"\n")
            .unwrap();

        let descriptor = LevelDescriptor::from_toml_str(
            r#"
            [[entities]]
            kind = "prop"
            name = "sign"
            dialogue = "sign.toml"
            "#,
        )
        .unwrap();
        let mut assets = AssetManager::new(&root);
        let level = Level::populate(
            &descriptor,
            &Prototypes::stock(),
            &mut assets,
            &TextBoxConfig::default(),
        )
        .unwrap();
        fs::remove_dir_all(&root).ok();

        assert!(level.player.is_none());
        assert_eq!(level.interactable.len(), 1);
        let sign = level.world.iter().next().unwrap();
        assert_eq!(sign.dialogue().unwrap()[0].text, "Welcome to the grove.");
        assert_eq!(sign.dialogue().unwrap()[0].cps, 30);
    }

    #[test]
    fn test_missing_asset_names_the_entity() {
        let descriptor = LevelDescriptor::from_toml_str(
            r#"
            [[entities]]
            kind = "prop"
            name = "statue"
            image = "statue.png"
            "#,
        )
        .unwrap();
        let err = Level::populate(
            &descriptor,
            &Prototypes::stock(),
            &mut AssetManager::new("does-not-exist"),
            &TextBoxConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("statue"));
    }
}
