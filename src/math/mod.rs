// Math utilities: vectors and rectangles

pub mod rect;
pub mod vector;

pub use rect::Rect;
pub use vector::{per_frame, to_pixels, Vector};
