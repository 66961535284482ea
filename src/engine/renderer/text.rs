// Text styling and measurement

use super::{Color, WHITE};
use serde::{Deserialize, Serialize};

/// How a run of text is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Color,
    /// Font size in pixels
    pub size: u32,
    /// Extra pixels between lines
    pub line_separation: i32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: WHITE,
            size: 14,
            line_separation: 0,
        }
    }
}

/// Font measurements used for word wrapping. The frame driver owns the real
/// fonts and can provide exact metrics; the engine falls back to a monospace
/// estimate.
pub trait GlyphMetrics {
    /// Width in pixels of `text` at `size`
    fn text_width(&self, text: &str, size: u32) -> i32;

    /// Height of one line at `size`
    fn line_height(&self, size: u32) -> i32;
}

/// Fixed-advance approximation: every glyph is `size * advance_ratio` wide
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub advance_ratio: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, size: u32) -> i32 {
        let advance = (size as f32 * self.advance_ratio).round() as i32;
        text.chars().count() as i32 * advance
    }

    fn line_height(&self, size: u32) -> i32 {
        size as i32
    }
}
