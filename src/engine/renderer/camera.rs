// Scrolling camera for the 2D world view

use crate::math::Rect;
use glam::IVec2;

/// Edge-scrolling camera: the view only moves when the target gets within
/// `scroll_margin` pixels of a screen edge.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Viewport width in pixels
    viewport_width: i32,
    /// Viewport height in pixels
    viewport_height: i32,
    /// Distance from each screen edge that triggers scrolling
    scroll_margin: i32,
}

impl Camera {
    /// Create a new camera
    pub fn new(viewport_width: i32, viewport_height: i32, scroll_margin: i32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            scroll_margin,
        }
    }

    /// How far the view at `offset` has to scroll so `target` stays inside the
    /// margins. Horizontal and vertical are independent.
    pub fn follow(&self, offset: IVec2, target: &Rect) -> IVec2 {
        let margin_left = offset.x + self.scroll_margin;
        let margin_right = offset.x + self.viewport_width - self.scroll_margin;
        let margin_top = offset.y + self.scroll_margin;
        let margin_bottom = offset.y + self.viewport_height - self.scroll_margin;

        let scroll_x = if target.right() > margin_right {
            target.right() - margin_right
        } else if target.left() < margin_left {
            target.left() - margin_left
        } else {
            0
        };

        let scroll_y = if target.top() < margin_top {
            target.top() - margin_top
        } else if target.bottom() > margin_bottom {
            target.bottom() - margin_bottom
        } else {
            0
        };

        IVec2::new(scroll_x, scroll_y)
    }

    /// The world-space area visible when the view sits at `offset`
    pub fn viewport(&self, offset: IVec2) -> Viewport {
        Viewport {
            min: offset,
            max: offset + IVec2::new(self.viewport_width, self.viewport_height),
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min: IVec2,
    pub max: IVec2,
}

impl Viewport {
    /// Check if a point is inside the viewport
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Check if a rectangle overlaps the viewport
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        rect.right() > self.min.x
            && rect.left() < self.max.x
            && rect.bottom() > self.min.y
            && rect.top() < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(512, 288, 80)
    }

    #[test]
    fn test_no_scroll_inside_margins() {
        let target = Rect::new(200, 100, 64, 64);
        assert_eq!(camera().follow(IVec2::ZERO, &target), IVec2::ZERO);
    }

    #[test]
    fn test_scroll_right_and_down() {
        // right edge 450 is 18px past the right margin at 432
        let target = Rect::new(386, 150, 64, 64);
        assert_eq!(camera().follow(IVec2::ZERO, &target), IVec2::new(18, 6));
    }

    #[test]
    fn test_scroll_left_and_up_relative_to_offset() {
        let offset = IVec2::new(100, 100);
        let target = Rect::new(170, 175, 64, 64);
        assert_eq!(camera().follow(offset, &target), IVec2::new(-10, -5));
    }

    #[test]
    fn test_viewport_bounds() {
        let viewport = camera().viewport(IVec2::new(10, 20));
        assert_eq!(viewport.min, IVec2::new(10, 20));
        assert_eq!(viewport.max, IVec2::new(522, 308));
        assert!(viewport.contains(IVec2::new(10, 20)));
        assert!(!viewport.contains(IVec2::new(522, 20)));
        assert!(viewport.intersects_rect(&Rect::new(0, 0, 11, 21)));
        assert!(!viewport.intersects_rect(&Rect::new(0, 0, 10, 10)));
    }
}
