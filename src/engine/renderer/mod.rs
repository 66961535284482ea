// Rendering: draw surfaces and the per-frame render list
//
// Game code never talks to a window directly. It draws onto a `Surface`;
// the frame driver receives a `RenderList` and hands it to a `Presenter`.
// `RgbaImage` is also a surface, which is what sprite compositing uses.

mod camera;
mod present;
mod text;

pub use camera::{Camera, Viewport};
pub use present::Presenter;
pub use text::{GlyphMetrics, MonospaceMetrics, TextStyle};

use crate::math::Rect;
use glam::IVec2;
use image::{imageops, Rgba, RgbaImage};
use std::sync::Arc;

/// RGBA colour
pub type Color = [u8; 4];

/// Opaque colour from RGB components
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r, g, b, 255]
}

pub const WHITE: Color = rgb(255, 255, 255);
pub const TRANSPARENT: Color = [0, 0, 0, 0];

/// Something sprites can be drawn onto
pub trait Surface {
    /// Fill the whole surface
    fn fill(&mut self, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blend an image with its top-left corner at `position`
    fn blit(&mut self, image: &Arc<RgbaImage>, position: IVec2);
}

/// A surface that can also lay down text
pub trait TextSurface: Surface {
    fn draw_text(&mut self, text: &str, position: IVec2, style: &TextStyle);
}

impl Surface for RgbaImage {
    fn fill(&mut self, color: Color) {
        for pixel in self.pixels_mut() {
            *pixel = Rgba(color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bounds = Rect::new(0, 0, self.width() as i32, self.height() as i32);
        let Some(area) = rect.clip(&bounds) else {
            return;
        };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.put_pixel(x as u32, y as u32, Rgba(color));
            }
        }
    }

    fn blit(&mut self, image: &Arc<RgbaImage>, position: IVec2) {
        imageops::overlay(self, image.as_ref(), position.x as i64, position.y as i64);
    }
}

/// A single draw instruction
#[derive(Debug, Clone)]
pub enum RenderCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    Blit { image: Arc<RgbaImage>, position: IVec2 },
    Text { text: String, position: IVec2, style: TextStyle },
}

/// Ordered draw instructions for one frame
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replay every image command onto a software target. Text needs a font
    /// rasterizer and is left to the frame driver.
    pub fn rasterize(&self, target: &mut RgbaImage) {
        for command in &self.commands {
            match command {
                RenderCommand::Clear(color) => target.fill(*color),
                RenderCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                RenderCommand::Blit { image, position } => target.blit(image, *position),
                RenderCommand::Text { text, .. } => {
                    log::trace!("Skipping text run while rasterizing: {:?}", text);
                }
            }
        }
    }
}

impl Surface for RenderList {
    fn fill(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::FillRect { rect, color });
    }

    fn blit(&mut self, image: &Arc<RgbaImage>, position: IVec2) {
        self.commands.push(RenderCommand::Blit {
            image: Arc::clone(image),
            position,
        });
    }
}

impl TextSurface for RenderList {
    fn draw_text(&mut self, text: &str, position: IVec2, style: &TextStyle) {
        self.commands.push(RenderCommand::Text {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}
