//! Headless симуляция аквариума
//!
//! Runs the Bevy App without rendering and prints population stats, useful
//! for checking spawn distributions and determinism of a config.

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::Events;
use clap::Parser;

use aquarium_simulation::{
    create_headless_app, log_error, log_info, FishRegistry, FishRetargeted, RarityTier, SimulationPlugin,
};

#[derive(Parser, Debug)]
#[command(name = "aquarium_simulation", about = "Headless aquarium simulation")]
struct Args {
    /// RON config file (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RON fish catalog (overrides the config's catalog_path)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// RNG seed (overrides the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks to run
    #[arg(long, default_value_t = 1000)]
    ticks: u32,

    /// Print population every N ticks
    #[arg(long, default_value_t = 100)]
    report_every: u32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let plugin = match SimulationPlugin::from_files(args.config.as_deref(), args.catalog.as_deref()) {
        Ok(plugin) => plugin,
        Err(err) => {
            aquarium_simulation::init_logger();
            log_error(&format!("Failed to load configuration: {}", err));
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or(plugin.config.seed);
    let catalog_size = plugin.catalog.len();

    let mut app = create_headless_app(seed);
    app.add_plugins(plugin);

    log_info(&format!(
        "Starting aquarium headless simulation (seed: {}, catalog: {} fish)",
        seed, catalog_size
    ));

    let report_every = args.report_every.max(1);
    let mut retargets = 0usize;
    for tick in 0..args.ticks {
        app.update();

        retargets += app
            .world_mut()
            .resource_mut::<Events<FishRetargeted>>()
            .drain()
            .count();

        if tick % report_every == 0 {
            let registry = app.world().resource::<FishRegistry>();
            log_info(&format!(
                "Tick {}: {} fish (Common {}, Rare {}, Epic {}), {} retargets so far",
                tick,
                registry.total(),
                registry.count(RarityTier::Common),
                registry.count(RarityTier::Rare),
                registry.count(RarityTier::Epic),
                retargets,
            ));
        }
    }

    log_info(&format!("Simulation complete! {} waypoint retargets", retargets));
    ExitCode::SUCCESS
}
