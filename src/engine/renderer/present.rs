// Window presentation: rasterize the render list and copy it onto the swapchain

use super::{GlyphMetrics, MonospaceMetrics, RenderCommand, RenderList, Surface};
use crate::math::Rect;
use anyhow::{anyhow, Result};
use image::RgbaImage;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

/// Byte order the swapchain expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelOrder {
    Rgba,
    Bgra,
}

impl PixelOrder {
    fn of(format: wgpu::TextureFormat) -> Option<Self> {
        match format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
                Some(Self::Rgba)
            }
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
                Some(Self::Bgra)
            }
            _ => None,
        }
    }
}

/// Shows frames in a window. Every frame is drawn in software onto a
/// canvas of the configured screen size, then written straight into the
/// surface texture.
pub struct Presenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    order: PixelOrder,
    canvas: RgbaImage,
    metrics: MonospaceMetrics,
}

impl Presenter {
    /// Set up a swapchain on `window` for a `width` x `height` canvas
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        if !surface_caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(anyhow!("window surface does not accept pixel uploads"));
        }
        let (format, order) = surface_caps
            .formats
            .iter()
            .find_map(|format| PixelOrder::of(*format).map(|order| (*format, order)))
            .ok_or_else(|| anyhow!("window surface has no 8-bit RGBA or BGRA format"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        info!(
            "Presenting a {}x{} canvas in a {}x{} window ({:?})",
            width, height, size.width, size.height, format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            order,
            canvas: RgbaImage::new(width, height),
            metrics: MonospaceMetrics::default(),
        })
    }

    /// Draw `frame` and put it on screen
    pub fn present(&mut self, frame: &RenderList) -> Result<()> {
        rasterize_frame(frame, &mut self.canvas, &self.metrics);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, dropping a frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let width = self.canvas.width().min(self.config.width);
        let height = self.canvas.height().min(self.config.height);
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &output.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &surface_bytes(&self.canvas, self.order),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.canvas.width()),
                rows_per_image: Some(self.canvas.height()),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::empty());
        output.present();
        Ok(())
    }
}

/// Replay `frame` onto `canvas`. Without a font rasterizer each visible
/// glyph becomes a solid cell, so dialogue still shows its reveal and layout.
fn rasterize_frame(frame: &RenderList, canvas: &mut RgbaImage, metrics: &dyn GlyphMetrics) {
    frame.rasterize(canvas);
    for command in frame.commands() {
        let RenderCommand::Text { text, position, style } = command else {
            continue;
        };
        let advance = metrics.text_width("M", style.size);
        let line = metrics.line_height(style.size);
        let cell_height = (line * 2 / 3).max(1);
        for (index, glyph) in text.chars().enumerate() {
            if glyph.is_whitespace() {
                continue;
            }
            let cell = Rect::new(
                position.x + index as i32 * advance,
                position.y + line - cell_height,
                (advance - 1).max(1),
                cell_height,
            );
            canvas.fill_rect(cell, style.color);
        }
    }
}

fn surface_bytes(canvas: &RgbaImage, order: PixelOrder) -> Vec<u8> {
    match order {
        PixelOrder::Rgba => canvas.as_raw().clone(),
        PixelOrder::Bgra => canvas
            .pixels()
            .flat_map(|pixel| {
                let [r, g, b, a] = pixel.0;
                [b, g, r, a]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{rgb, TextStyle, TextSurface};
    use glam::IVec2;

    #[test]
    fn test_pixel_order_of_formats() {
        assert_eq!(
            PixelOrder::of(wgpu::TextureFormat::Bgra8UnormSrgb),
            Some(PixelOrder::Bgra)
        );
        assert_eq!(
            PixelOrder::of(wgpu::TextureFormat::Rgba8Unorm),
            Some(PixelOrder::Rgba)
        );
        assert_eq!(PixelOrder::of(wgpu::TextureFormat::Rgba16Float), None);
    }

    #[test]
    fn test_bgra_swaps_red_and_blue() {
        let canvas = RgbaImage::from_pixel(2, 1, image::Rgba([1, 2, 3, 4]));
        assert_eq!(surface_bytes(&canvas, PixelOrder::Bgra), vec![3, 2, 1, 4, 3, 2, 1, 4]);
        assert_eq!(surface_bytes(&canvas, PixelOrder::Rgba), vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn test_text_becomes_glyph_cells() {
        let mut frame = RenderList::new();
        frame.fill(rgb(0, 0, 110));
        let style = TextStyle {
            color: rgb(255, 255, 0),
            size: 10,
            line_separation: 0,
        };
        frame.draw_text("a b", IVec2::new(0, 0), &style);

        let mut canvas = RgbaImage::new(32, 16);
        rasterize_frame(&frame, &mut canvas, &MonospaceMetrics::default());

        // 6px advance, 6px cells sitting on the 10px line
        assert_eq!(canvas.get_pixel(0, 9).0, rgb(255, 255, 0));
        assert_eq!(canvas.get_pixel(0, 2).0, rgb(0, 0, 110));
        // The space leaves a gap
        assert_eq!(canvas.get_pixel(7, 9).0, rgb(0, 0, 110));
        assert_eq!(canvas.get_pixel(12, 9).0, rgb(255, 255, 0));
    }
}
