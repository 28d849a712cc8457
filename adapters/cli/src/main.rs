#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Piano Tiles experience.

mod config;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use piano_tiles_rendering::{FrameControl, RenderingBackend};
use piano_tiles_rendering_macroquad::MacroquadBackend;
use piano_tiles_system_session::{FrameStatus, Game};
use piano_tiles_system_spawning::SeededLanes;

use self::config::AppConfig;

/// Command-line arguments accepted by the Piano Tiles binary.
#[derive(Debug, Parser)]
#[command(
    name = "piano-tiles",
    version,
    about = "Click the lowest falling tile before it leaves the screen"
)]
struct CliArgs {
    /// TOML configuration file; `piano-tiles.toml` is used when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for tile lane selection; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Log frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
}

/// Entry point for the Piano Tiles command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("lane seed {seed}");

    let mut game = Game::new(config.game, SeededLanes::new(seed))
        .context("invalid [game] configuration")?;
    let presentation = simulation::presentation(&game);

    let mut backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_font_size(config.display.font_size);
    if let Some(font_path) = config.display.font_path {
        backend = backend.with_font(font_path);
    }

    backend
        .run(presentation, move |dt, input, scene| {
            let status = game.frame(&input.events, dt);
            simulation::populate_scene(&game, scene);
            match status {
                FrameStatus::Continue => FrameControl::Continue,
                FrameStatus::Exit => FrameControl::Exit,
            }
        })
        .context("rendering backend failed")
}
