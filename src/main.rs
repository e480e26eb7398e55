//! Sprite stack demo host.
//!
//! Headless frame loop around the library:
//! - **bevy_ecs** world holding the camera, views, animations and sprites
//! - **image** software canvas the sprites are composited onto
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing) and optional animation JSON
//! 2. Insert resources and run the demo `setup` system once
//! 3. Each frame: demo update, clear canvas, render all stacked sprites
//! 4. Write the last frame to a PNG
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 90 --output frame.png
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::PathBuf;

use spritestack::game;
use spritestack::resources::animationstore::AnimationStore;
use spritestack::resources::camera::Camera;
use spritestack::resources::canvas::FrameCanvas;
use spritestack::resources::gameconfig::GameConfig;
use spritestack::resources::renderstats::RenderStats;
use spritestack::resources::screensize::ScreenSize;
use spritestack::resources::viewstore::ViewStore;
use spritestack::systems::render::{clear_canvas, render_system};

/// Render a sprite stack scene to a PNG.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Number of frames to simulate (overrides the config file).
    #[arg(long)]
    frames: Option<u32>,

    /// Where to write the last frame.
    #[arg(long, value_name = "PATH", default_value = "frame.png")]
    output: PathBuf,

    /// JSON file with extra animation definitions.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }

    let mut animations = AnimationStore::new();
    if let Some(path) = &cli.animations {
        if let Err(e) = animations.load_from_file(path) {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    let (width, height) = config.render_size();
    let frames = config.frames;

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(ScreenSize::new(width as i32, height as i32));
    world.insert_resource(FrameCanvas::new(width, height));
    world.insert_resource(Camera::default());
    world.insert_resource(ViewStore::new());
    world.insert_resource(animations);
    world.insert_resource(RenderStats::default());
    world.insert_resource(config);

    if let Err(e) = world.run_system_once(game::setup) {
        error!("Scene setup failed: {}", e);
        std::process::exit(1);
    }

    let mut update = Schedule::default();
    update.add_systems((game::update, clear_canvas, render_system).chain());

    // --------------- Main loop ---------------
    info!("Rendering {} frames at {}x{}", frames, width, height);
    for frame in 0..frames {
        update.run(&mut world);
        let stats = *world.resource::<RenderStats>();
        debug!(
            "frame {}: drawn={} culled={} no_view={} no_image={}",
            frame, stats.drawn, stats.culled, stats.no_view, stats.no_image
        );
    }

    let stats = *world.resource::<RenderStats>();
    info!(
        "Last frame: {} drawn, {} skipped",
        stats.drawn,
        stats.skipped()
    );

    if let Err(e) = world.resource::<FrameCanvas>().save(&cli.output) {
        error!("{}", e);
        std::process::exit(1);
    }
}
