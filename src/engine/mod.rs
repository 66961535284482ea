// Engine modules: assets, config, errors, frame clock, input, rendering

pub mod assets;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod renderer;
