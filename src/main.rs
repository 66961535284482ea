use anyhow::Result;
use image::{Rgba, RgbaImage};
use log::{error, info};
use rusted_grove::engine::assets::{AssetManager, AssetType};
use rusted_grove::engine::config::EngineConfig;
use rusted_grove::engine::game_loop::FrameClock;
use rusted_grove::engine::input::{InputConfig, InputManager};
use rusted_grove::engine::renderer::Presenter;
use rusted_grove::game::prototypes::PLAYER_SHEET;
use rusted_grove::game::{GameState, Level, LevelDescriptor, Prototypes};
use std::path::Path;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

const CONFIG_FILE: &str = "grove.toml";
const START_LEVEL: &str = "grove.toml";

/// Played when the asset root has no level of its own
const FALLBACK_LEVEL: &str = r#"
[[entities]]
kind = "player"
position = [192, 112]

[[entities]]
kind = "prop"
name = "boulder"
position = [352, 48]
base_height = 40

[[entities]]
kind = "prop"
name = "stump"
position = [32, 160]
base_height = 24
"#;

fn load_config() -> Result<EngineConfig> {
    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    if Path::new(&path).exists() {
        info!("Loading config from {}", path);
        EngineConfig::load(&path)
    } else {
        info!("No config at {}, using defaults", path);
        Ok(EngineConfig::default())
    }
}

fn load_level(config: &EngineConfig) -> Result<Level> {
    let mut assets = AssetManager::new(&config.asset_root);

    if !assets.loader().exists(AssetType::Image, PLAYER_SHEET) {
        info!("{} not found, drawing the player as a block", PLAYER_SHEET);
        assets.insert_image(PLAYER_SHEET, RgbaImage::from_pixel(256, 320, Rgba([230, 190, 40, 255])));
    }

    let descriptor = if assets.loader().exists(AssetType::Level, START_LEVEL) {
        LevelDescriptor::load(assets.loader(), START_LEVEL)?
    } else {
        info!("No {} level, loading the fallback", START_LEVEL);
        LevelDescriptor::from_toml_str(FALLBACK_LEVEL)?
    };

    let level = Level::populate(&descriptor, &Prototypes::stock(), &mut assets, &config.textbox)?;
    info!("Loaded {} images", assets.stats().image_count);
    Ok(level)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Grove...");

    let config = load_config()?;
    let level = load_level(&config)?;
    let (width, height) = config.screen_size;
    let mut clock = FrameClock::new(config.fps);
    let mut input = InputManager::new(InputConfig::with_remaps(&config.controls));
    let mut state = GameState::new(config, level)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rusted Grove")
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut presenter = pollster::block_on(Presenter::new(window.clone(), width, height))?;

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                input.request_quit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let delta_ms = clock.tick();
                match state.step(delta_ms, input.state()) {
                    Ok(frame) => {
                        log::trace!("Frame with {} draw commands", frame.len());
                        if let Err(err) = presenter.present(&frame) {
                            error!("Cannot present frame: {}", err);
                            elwt.exit();
                        }
                    }
                    Err(err) => {
                        error!("Game stopped: {}", err);
                        elwt.exit();
                    }
                }
                if input.state().quit_requested() {
                    info!("Quitting after {} frames", clock.frame_count());
                    elwt.exit();
                }
                input.update();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
