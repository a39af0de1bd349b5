//! emptybowl main entry point.
//!
//! Headless colony simulation that exercises the empty food bowl indicator:
//! - **bevy_ecs** for the world, schedule and observers
//! - **configparser** for the INI configuration
//! - **serde_json** for save games
//!
//! # Main Loop
//!
//! 1. Load the configuration, apply command line overrides
//! 2. Build the world, either a fresh colony or one loaded from a save
//! 3. Run the update schedule for the requested number of steps:
//!    - advance world time
//!    - colonists eat, haulers refill
//!    - indicators re-evaluate on their cadence
//! 4. Optionally write a save game
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --cadence realtime --steps 20000
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};

use emptybowl::game::{
    Colony, build_update_schedule, setup_colony, setup_world, shown_indicator_count,
};
use emptybowl::resources::indicatorconfig::{CadenceKind, IndicatorConfig};
use emptybowl::resources::worldtime::WorldTime;
use emptybowl::save::savegame::{load_game, read_save, save_game, write_save};
use emptybowl::systems::time::update_world_time;

/// Food bowl empty indicator simulation
#[derive(Parser)]
#[command(version, about = "Simulates food bowls that flag themselves when empty.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./emptybowl.ini")]
    config: PathBuf,

    /// Override the cadence from the config file: rare, realtime or ticks.
    #[arg(long)]
    cadence: Option<CadenceKind>,

    /// Number of simulation steps to run.
    #[arg(long, default_value_t = 120_000)]
    steps: u64,

    /// Real seconds per step.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Override the simulation speed multiplier.
    #[arg(long)]
    time_scale: Option<f32>,

    /// Number of food bowls in a fresh colony.
    #[arg(long, default_value_t = 4)]
    bowls: usize,

    /// Seed for colonist and hauler activity.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write a save game here when the run ends.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Start from this save game instead of a fresh colony.
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = IndicatorConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if let Some(cadence) = cli.cadence {
        config.cadence = cadence;
    }
    if let Some(time_scale) = cli.time_scale {
        config.time_scale = time_scale;
    }

    // Early-exit: dump the configuration and quit
    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    info!("Running with the {} cadence", config.cadence);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    setup_world(&mut world, config);
    world.insert_resource(Colony::new(cli.seed));

    let bowls = match &cli.load {
        Some(path) => match read_save(path) {
            Ok(save) => load_game(&mut world, &save),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => setup_colony(&mut world, cli.bowls),
    };

    let mut update = build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    for _ in 0..cli.steps {
        update_world_time(&mut world, cli.dt);
        update.run(&mut world);
        world.clear_trackers();
    }

    let time = *world.resource::<WorldTime>();
    info!(
        "Stopped at tick {} ({:.1}s real, {:.1}s simulated), {} of {} bowls flagged empty",
        time.ticks,
        time.real_elapsed,
        time.elapsed,
        shown_indicator_count(&mut world),
        bowls.len()
    );

    if let Some(path) = cli.save {
        let save = save_game(&mut world);
        if let Err(e) = write_save(&path, &save) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
