// 2D vector helpers

use glam::{IVec2, Vec2};

/// Velocity / offset value type. Additive, reassigned rather than mutated in place.
pub type Vector = Vec2;

/// Snap a sub-pixel displacement to whole pixels, truncating toward zero
pub fn to_pixels(v: Vector) -> IVec2 {
    IVec2::new(v.x.trunc() as i32, v.y.trunc() as i32)
}

/// Scale a per-second rate by a frame delta in milliseconds
pub fn per_frame(rate_per_sec: f32, delta_ms: u32) -> f32 {
    rate_per_sec * delta_ms as f32 / 1000.0
}
