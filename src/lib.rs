//! Core of a small top-down 2D adventure engine: sprite animation and
//! compositing, rect collision, a scrolling camera, and branching dialogue
//! played through cutscenes.
//!
//! The engine never owns a window. [`game::GameState::step`] takes the
//! elapsed milliseconds and the sampled input, and returns a render list for
//! the frame driver to present.

pub mod engine;
pub mod game;
pub mod math;
