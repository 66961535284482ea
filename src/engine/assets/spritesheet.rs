// Spritesheet frame maps: where each animation frame lives on which sheet

use crate::engine::error::{EngineError, Result};
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Frame size used when a cut does not give one
pub const DEFAULT_FRAME_SIZE: (u32, u32) = (32, 32);

/// One frame-cut descriptor: a region of one spritesheet.
///
/// Written in content files as `[x, y]`, `[x, y, sheet]`,
/// `[x, y, width, height]` or `[x, y, width, height, sheet]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>")]
pub struct FrameCut {
    /// Position on the sheet (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the frame (pixels)
    pub width: u32,
    pub height: u32,

    /// Index of the sheet to cut from
    pub sheet: usize,
}

impl FrameCut {
    /// A default-sized cut from the first sheet
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            width: DEFAULT_FRAME_SIZE.0,
            height: DEFAULT_FRAME_SIZE.1,
            sheet: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn on_sheet(mut self, sheet: usize) -> Self {
        self.sheet = sheet;
        self
    }

    /// Parse the compact list form
    pub fn from_slice(values: &[u32]) -> Result<Self> {
        match *values {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, sheet] => Ok(Self::new(x, y).on_sheet(sheet as usize)),
            [x, y, w, h] => Ok(Self::new(x, y).with_size(w, h)),
            [x, y, w, h, sheet] => Ok(Self::new(x, y).with_size(w, h).on_sheet(sheet as usize)),
            _ => Err(EngineError::config(format!(
                "frame cut needs 2 to 5 values, got {}",
                values.len()
            ))),
        }
    }
}

impl TryFrom<Vec<u32>> for FrameCut {
    type Error = EngineError;

    fn try_from(values: Vec<u32>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

/// Row-major cuts over a uniform grid of `columns` x `rows` frames
pub fn grid(frame_width: u32, frame_height: u32, columns: u32, rows: u32) -> Vec<FrameCut> {
    let mut cuts = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            cuts.push(
                FrameCut::new(column * frame_width, row * frame_height)
                    .with_size(frame_width, frame_height),
            );
        }
    }
    cuts
}

/// Cut every frame of a frame map out of its sheet
pub fn cut_frames(sheets: &[Arc<RgbaImage>], cuts: &[FrameCut]) -> Result<Vec<Arc<RgbaImage>>> {
    if !cuts.is_empty() && sheets.is_empty() {
        return Err(EngineError::config(
            "cannot provide a frame map without a spritesheet",
        ));
    }

    cuts.iter()
        .map(|cut| {
            let sheet = sheets.get(cut.sheet).ok_or_else(|| {
                EngineError::config(format!(
                    "requested a sprite from sheet {}, but only {} sheets were found",
                    cut.sheet,
                    sheets.len()
                ))
            })?;

            let fits = |start: u32, size: u32, limit: u32| {
                start.checked_add(size).map_or(false, |end| end <= limit)
            };
            if !fits(cut.x, cut.width, sheet.width()) || !fits(cut.y, cut.height, sheet.height()) {
                return Err(EngineError::config(format!(
                    "frame at ({}, {}) sized {}x{} does not fit on a {}x{} sheet",
                    cut.x,
                    cut.y,
                    cut.width,
                    cut.height,
                    sheet.width(),
                    sheet.height()
                )));
            }

            let frame = imageops::crop_imm(sheet.as_ref(), cut.x, cut.y, cut.width, cut.height);
            Ok(Arc::new(frame.to_image()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker_sheet() -> Arc<RgbaImage> {
        // Left half red, right half blue
        Arc::new(RgbaImage::from_fn(64, 32, |x, _| {
            if x < 32 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        }))
    }

    #[test]
    fn test_compact_forms() {
        assert_eq!(FrameCut::from_slice(&[1, 2]).unwrap(), FrameCut::new(1, 2));
        assert_eq!(FrameCut::from_slice(&[1, 2, 1]).unwrap().sheet, 1);

        let sized = FrameCut::from_slice(&[1, 2, 64, 48]).unwrap();
        assert_eq!((sized.width, sized.height, sized.sheet), (64, 48, 0));

        let full = FrameCut::from_slice(&[0, 0, 16, 16, 2]).unwrap();
        assert_eq!((full.width, full.sheet), (16, 2));

        assert!(FrameCut::from_slice(&[1]).is_err());
    }

    #[test]
    fn test_deserialize_from_list() {
        #[derive(Deserialize)]
        struct Map {
            frames: Vec<FrameCut>,
        }
        let map: Map = toml::from_str("frames = [[0, 0], [32, 0, 16, 16]]").unwrap();
        assert_eq!(map.frames.len(), 2);
        assert_eq!(map.frames[1].width, 16);
    }

    #[test]
    fn test_cut_frames() {
        let frames = cut_frames(&[checker_sheet()], &grid(32, 32, 2, 1)).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(frames[1].get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_missing_sheet_is_config_error() {
        let err = cut_frames(&[checker_sheet()], &[FrameCut::new(0, 0).on_sheet(1)]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let err = cut_frames(&[], &[FrameCut::new(0, 0)]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_out_of_bounds_cut() {
        let err = cut_frames(&[checker_sheet()], &[FrameCut::new(48, 0)]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_cut_past_u32_range() {
        let sheet = Arc::new(RgbaImage::new(64, 64));
        let cut = FrameCut::from_slice(&[u32::MAX, 0]).unwrap();
        let err = cut_frames(&[sheet.clone()], &[cut]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let cut = FrameCut::new(0, 1).with_size(16, u32::MAX);
        let err = cut_frames(&[sheet], &[cut]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_grid_is_row_major() {
        let cuts = grid(64, 64, 4, 2);
        assert_eq!(cuts.len(), 8);
        assert_eq!((cuts[3].x, cuts[3].y), (192, 0));
        assert_eq!((cuts[4].x, cuts[4].y), (0, 64));
    }
}
