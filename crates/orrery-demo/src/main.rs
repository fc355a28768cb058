//! Orrery demo — scripted headless tour of the solar system viewer.
//!
//! Loads configuration from `config.ron` (CLI flags override), builds the
//! seeded solar system, and runs a fixed-timestep session that flies the
//! camera to Earth, enters first-person surface mode, walks around, and
//! exits. The session drives the same controllers a windowed frontend
//! would, so it doubles as an end-to-end smoke run.
//!
//! Run with: `cargo run -p orrery-demo`
//! Override config: `cargo run -p orrery-demo -- --walk-speed 8 --log-level debug`

mod hud;
mod session;

use clap::Parser;
use orrery_config::{CliArgs, Config, default_config_dir};
use orrery_system::SolarSystem;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            // A broken config file should not brick the viewer; fall back
            // to defaults and tell the user where the bad file lives.
            eprintln!(
                "failed to load config from {}: {err}; using defaults",
                config_dir.display()
            );
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&config_dir), cfg!(debug_assertions), Some(&config));

    info!("Orrery — solar system viewer (headless demo session)");
    info!(
        walk_speed = config.locomotion.walk_speed,
        orbit_scale = config.simulation.orbit_speed_scale,
        "configuration loaded"
    );

    let mut system = SolarSystem::default();
    system.orbit_speed_scale = config.simulation.orbit_speed_scale;
    system.set_paused(config.simulation.start_paused);
    info!(
        bodies = system.bodies().len(),
        spacecraft = system.satellites().len(),
        "solar system seeded"
    );

    if let Err(err) = session::run(&config, &mut system) {
        error!(%err, "demo session failed");
        std::process::exit(1);
    }
}
