//! Command-line argument parsing for the Orrery viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Interactive solar system viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Walking speed in length units per second.
    #[arg(long)]
    pub walk_speed: Option<f32>,

    /// Global multiplier on orbital speed.
    #[arg(long)]
    pub orbit_speed: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(speed) = args.walk_speed {
            self.locomotion.walk_speed = speed;
        }
        if let Some(scale) = args.orbit_speed {
            self.simulation.orbit_speed_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
