// Integer axis-aligned rectangle

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    pub fn set_position(&mut self, position: IVec2) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn set_size(&mut self, size: IVec2) {
        self.w = size.x;
        self.h = size.y;
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    // Edge setters move the rect; they never resize it.

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Place the rect so the middle of its bottom edge sits on `point`
    pub fn set_mid_bottom(&mut self, point: IVec2) {
        self.x = point.x - self.w / 2;
        self.y = point.y - self.h;
    }

    /// Place the rect so the middle of its top edge sits on `point`
    pub fn set_mid_top(&mut self, point: IVec2) {
        self.x = point.x - self.w / 2;
        self.y = point.y;
    }

    /// Place the rect so the middle of its left edge sits on `point`
    pub fn set_mid_left(&mut self, point: IVec2) {
        self.x = point.x;
        self.y = point.y - self.h / 2;
    }

    /// Place the rect so the middle of its right edge sits on `point`
    pub fn set_mid_right(&mut self, point: IVec2) {
        self.x = point.x - self.w;
        self.y = point.y - self.h / 2;
    }

    /// Translate in place
    pub fn move_by(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Translated copy
    pub fn translated(&self, delta: IVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Whether the rects share any area. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rect containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Clip against another rect, returning `None` if nothing is left
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}
