// Asset loading functionality

use super::AssetError;
use anyhow::Result;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Image,
    Level,
    Dialogue,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Image => "images",
            AssetType::Level => "levels",
            AssetType::Dialogue => "dialogue",
        }
    }
}

/// Asset loader responsible for finding and loading asset files.
/// Every path is resolved against the root passed at construction.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)).into())
    }

    /// Load asset text from disk
    pub fn load_text(&self, asset_type: AssetType, name: &str) -> Result<String> {
        let bytes = self.load_bytes(asset_type, name)?;
        String::from_utf8(bytes)
            .map_err(|e| AssetError::LoadError(format!("{} is not UTF-8: {}", name, e)).into())
    }

    /// Load and decode an image into RGBA pixels
    pub fn load_image(&self, name: &str) -> Result<RgbaImage> {
        let bytes = self.load_bytes(AssetType::Image, name)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", name, e)))?;
        Ok(image.to_rgba8())
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Image.default_directory(), "images");
        assert_eq!(AssetType::Level.default_directory(), "levels");
        assert_eq!(AssetType::Dialogue.default_directory(), "dialogue");
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Image, "player.png");

        assert_eq!(path, PathBuf::from("/game/assets/images/player.png"));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        let err = loader.load_image("ghost.png").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::NotFound(_))
        ));
        assert!(!loader.exists(AssetType::Image, "ghost.png"));
    }
}
