// Central image cache

use super::AssetLoader;
use anyhow::Result;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Loads spritesheets once and hands out shared references
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Decoded images by name
    images: HashMap<String, Arc<RgbaImage>>,
}

impl AssetManager {
    /// Create a new asset manager rooted at `asset_path`
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            images: HashMap::new(),
        }
    }

    /// Load an image from disk, or return the cached copy
    pub fn load_image(&mut self, name: &str) -> Result<Arc<RgbaImage>> {
        if let Some(image) = self.images.get(name) {
            return Ok(Arc::clone(image));
        }

        let image = Arc::new(self.loader.load_image(name)?);
        log::debug!(
            "Loaded image {} ({}x{})",
            name,
            image.width(),
            image.height()
        );
        self.images.insert(name.to_string(), Arc::clone(&image));
        Ok(image)
    }

    /// Register an image that did not come from disk
    pub fn insert_image(&mut self, name: impl Into<String>, image: RgbaImage) -> Arc<RgbaImage> {
        let image = Arc::new(image);
        self.images.insert(name.into(), Arc::clone(&image));
        image
    }

    /// Get a previously loaded image
    pub fn image(&self, name: &str) -> Option<Arc<RgbaImage>> {
        self.images.get(name).cloned()
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            image_count: self.images.len(),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy)]
pub struct AssetStats {
    pub image_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_images_are_shared() {
        let mut manager = AssetManager::new("assets");
        let inserted = manager.insert_image("sheet", RgbaImage::new(8, 8));
        let cached = manager.load_image("sheet").unwrap();

        assert!(Arc::ptr_eq(&inserted, &cached));
        assert_eq!(manager.stats().image_count, 1);
    }

    #[test]
    fn test_missing_image() {
        let mut manager = AssetManager::new("/nowhere");
        assert!(manager.image("missing.png").is_none());
        assert!(manager.load_image("missing.png").is_err());
    }
}
