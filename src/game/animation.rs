// Sprite animation: named frame sequences cut from spritesheets

use crate::engine::assets::{cut_frames, FrameCut};
use crate::engine::error::{EngineError, Result};
use image::RgbaImage;
use std::sync::Arc;

/// How long each frame stays up unless configured otherwise
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// One entry of an animation: either an index into the cut frames (0-based)
/// or an image supplied directly
#[derive(Debug, Clone)]
pub enum FrameRef {
    Index(usize),
    Image(Arc<RgbaImage>),
}

impl From<usize> for FrameRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Arc<RgbaImage>> for FrameRef {
    fn from(image: Arc<RgbaImage>) -> Self {
        Self::Image(image)
    }
}

/// A named, looping sequence of frames
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    frames: Vec<Arc<RgbaImage>>,
}

impl Animation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Picks the image to show for an entity at a given point in time
#[derive(Debug, Clone)]
pub struct Animator {
    /// Animations in declaration order; the first one plays initially
    animations: Vec<Animation>,
    current: usize,
    elapsed_ms: u32,
    frame_duration_ms: u32,
}

impl Animator {
    /// Cut `frame_map` out of `sheets` and resolve every animation's frames.
    pub fn new<N, F>(
        animations: impl IntoIterator<Item = (N, Vec<F>)>,
        sheets: &[Arc<RgbaImage>],
        frame_map: &[FrameCut],
    ) -> Result<Self>
    where
        N: Into<String>,
        F: Into<FrameRef>,
    {
        let cut = cut_frames(sheets, frame_map)?;

        let mut resolved = Vec::new();
        for (name, refs) in animations {
            let name = name.into();
            if refs.is_empty() {
                return Err(EngineError::config(format!(
                    "animation '{}' has no frames",
                    name
                )));
            }

            let mut frames = Vec::with_capacity(refs.len());
            for frame in refs {
                match frame.into() {
                    FrameRef::Index(index) => {
                        let image = cut.get(index).ok_or_else(|| {
                            EngineError::config(format!(
                                "animation '{}' uses frame {}, but only {} frames were cut",
                                name,
                                index,
                                cut.len()
                            ))
                        })?;
                        frames.push(Arc::clone(image));
                    }
                    FrameRef::Image(image) => frames.push(image),
                }
            }
            resolved.push(Animation { name, frames });
        }

        if resolved.is_empty() {
            return Err(EngineError::config("an animator needs at least one animation"));
        }

        Ok(Self {
            animations: resolved,
            current: 0,
            elapsed_ms: 0,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        })
    }

    /// Single still image, for entities that never animate
    pub fn still(name: impl Into<String>, image: Arc<RgbaImage>) -> Self {
        Self {
            animations: vec![Animation {
                name: name.into(),
                frames: vec![image],
            }],
            current: 0,
            elapsed_ms: 0,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }

    pub fn with_frame_duration(mut self, frame_duration_ms: u32) -> Self {
        self.frame_duration_ms = frame_duration_ms.max(1);
        self
    }

    /// Switch animations. Elapsed time is kept only when `name` is already
    /// playing and `reset` is false.
    pub fn play(&mut self, name: &str, reset: bool) -> Result<&Arc<RgbaImage>> {
        let index = self
            .animations
            .iter()
            .position(|animation| animation.name == name)
            .ok_or_else(|| EngineError::UnknownAnimation(name.to_string()))?;

        if reset || index != self.current {
            self.elapsed_ms = 0;
        }
        self.current = index;
        Ok(self.current_frame())
    }

    /// Move time forward, looping at the end of the animation
    pub fn advance(&mut self, delta_ms: u32) -> &Arc<RgbaImage> {
        let total = u64::from(self.total_duration_ms());
        self.elapsed_ms = ((u64::from(self.elapsed_ms) + u64::from(delta_ms)) % total) as u32;
        self.current_frame()
    }

    pub fn current_frame(&self) -> &Arc<RgbaImage> {
        let frames = &self.animations[self.current].frames;
        let index = (self.elapsed_ms / self.frame_duration_ms) as usize;
        &frames[index.min(frames.len() - 1)]
    }

    pub fn current_animation(&self) -> &str {
        &self.animations[self.current].name
    }

    /// First frame of the first animation
    pub fn first_frame(&self) -> &Arc<RgbaImage> {
        &self.animations[0].frames[0]
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.iter().any(|animation| animation.name == name)
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Length of one loop of the current animation
    pub fn total_duration_ms(&self) -> u32 {
        self.animations[self.current].frame_count() as u32 * self.frame_duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::grid;
    use image::Rgba;

    /// A 4-frame strip, each 32x32 frame a different shade of red
    fn strip() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_fn(128, 32, |x, _| {
            Rgba([(x / 32) as u8 * 60, 0, 0, 255])
        }))
    }

    fn shade(image: &RgbaImage) -> u8 {
        image.get_pixel(0, 0).0[0]
    }

    fn two_frame_idle() -> Animator {
        Animator::new([("idle", vec![0usize, 1])], &[strip()], &grid(32, 32, 4, 1)).unwrap()
    }

    #[test]
    fn test_starts_on_first_listed_animation() {
        let animator = Animator::new(
            [("walk", vec![2usize, 3]), ("idle", vec![0])],
            &[strip()],
            &grid(32, 32, 4, 1),
        )
        .unwrap();
        assert_eq!(animator.current_animation(), "walk");
        assert_eq!(shade(animator.current_frame()), 120);
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut animator = two_frame_idle();
        assert_eq!(shade(animator.advance(150)), 60);
        // 250ms wraps to 50ms
        assert_eq!(shade(animator.advance(100)), 0);
        assert_eq!(animator.elapsed_ms(), 50);
    }

    #[test]
    fn test_frames_never_go_back_within_a_loop() {
        let mut animator =
            Animator::new([("spin", vec![0usize, 1, 2, 3])], &[strip()], &grid(32, 32, 4, 1))
                .unwrap();
        let mut shown = vec![shade(animator.current_frame())];
        // 57 steps of 7ms stay inside the 400ms loop
        for _ in 0..57 {
            let current = shade(animator.advance(7));
            assert!(current >= *shown.last().unwrap());
            if current != *shown.last().unwrap() {
                shown.push(current);
            }
        }
        assert_eq!(shown, vec![0, 60, 120, 180]);

        // The next step crosses the loop boundary
        assert_eq!(shade(animator.advance(7)), 0);
    }

    #[test]
    fn test_full_loop_returns_to_start() {
        let mut animator = two_frame_idle();
        let start = Arc::clone(animator.current_frame());
        let total = animator.total_duration_ms();
        assert!(Arc::ptr_eq(animator.advance(total), &start));
    }

    #[test]
    fn test_play_without_reset_keeps_time() {
        let mut animator = Animator::new(
            [("idle", vec![0usize, 1]), ("walk", vec![2usize, 3])],
            &[strip()],
            &grid(32, 32, 4, 1),
        )
        .unwrap();

        animator.advance(120);
        animator.play("idle", false).unwrap();
        assert_eq!(animator.elapsed_ms(), 120);

        animator.play("idle", true).unwrap();
        assert_eq!(animator.elapsed_ms(), 0);

        animator.advance(120);
        let frame = animator.play("walk", false).unwrap();
        assert_eq!(shade(frame), 120);
        assert_eq!(animator.elapsed_ms(), 0);
    }

    #[test]
    fn test_unknown_animation() {
        let mut animator = two_frame_idle();
        let err = animator.play("dance", false).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAnimation(name) if name == "dance"));
    }

    #[test]
    fn test_raw_images_mix_with_indices() {
        let raw = Arc::new(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])));
        let frames = vec![FrameRef::Index(0), FrameRef::Image(Arc::clone(&raw))];
        let mut animator =
            Animator::new([("blink", frames)], &[strip()], &grid(32, 32, 1, 1)).unwrap();
        assert!(Arc::ptr_eq(animator.advance(100), &raw));
    }

    #[test]
    fn test_construction_errors() {
        let sheets = [strip()];
        let map = grid(32, 32, 4, 1);

        let no_sheet = Animator::new([("idle", vec![0usize])], &[], &map);
        assert!(matches!(no_sheet, Err(EngineError::Config(_))));

        let bad_index = Animator::new([("idle", vec![4usize])], &sheets, &map);
        assert!(matches!(bad_index, Err(EngineError::Config(_))));

        let empty = Animator::new([("idle", Vec::<usize>::new())], &sheets, &map);
        assert!(matches!(empty, Err(EngineError::Config(_))));

        let none = Animator::new(Vec::<(&str, Vec<usize>)>::new(), &sheets, &map);
        assert!(matches!(none, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_custom_frame_duration() {
        let mut animator = two_frame_idle().with_frame_duration(50);
        assert_eq!(animator.total_duration_ms(), 100);
        assert_eq!(shade(animator.advance(60)), 60);
    }
}
