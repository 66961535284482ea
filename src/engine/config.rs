// Engine configuration, loaded from TOML

use crate::engine::input::KeyBinding;
use crate::engine::renderer::{rgb, Color};
use crate::game::objects::PlayerStats;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Textbox layout and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxConfig {
    pub size: (u32, u32),
    /// Top-left corner on screen
    pub location: (i32, i32),
    pub background: Color,
    /// Padding between the box edge and the text
    pub text_margin: (i32, i32),
    /// After a page is fully shown, page turns are ignored for this long (ms)
    pub resting_period_ms: u32,
    /// Reveal rate used when a page does not give one
    pub default_cps: u32,
}

impl Default for TextBoxConfig {
    fn default() -> Self {
        Self {
            size: (480, 80),
            location: (16, 192),
            background: rgb(0, 0, 110),
            text_margin: (0, 0),
            resting_period_ms: 200,
            default_cps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fps: u32,
    pub screen_size: (u32, u32),
    /// Distance from a screen edge at which the camera starts scrolling
    pub scroll_margin: i32,
    pub background: Color,
    /// Root directory for images, levels and dialogue
    pub asset_root: PathBuf,
    pub player: PlayerStats,
    pub textbox: TextBoxConfig,
    /// Key remaps applied over the stock layout
    pub controls: Vec<KeyBinding>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            screen_size: (512, 288),
            scroll_margin: 80,
            background: rgb(128, 128, 155),
            asset_root: PathBuf::from("assets"),
            player: PlayerStats::default(),
            textbox: TextBoxConfig::default(),
            controls: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).context("malformed engine config")?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}
