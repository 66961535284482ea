// Asset management system
//
// Loads spritesheets and content files from the asset root, caches decoded
// images, and cuts animation frames out of sheets.

mod loader;
mod manager;
mod spritesheet;

pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, AssetStats};
pub use spritesheet::{cut_frames, grid, FrameCut, DEFAULT_FRAME_SIZE};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
