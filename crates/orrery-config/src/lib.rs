//! Configuration system for the Orrery viewer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap and hot-reload detection, with
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, InputConfig, LocomotionConfig, SimulationConfig, WindowConfig};
pub use error::ConfigError;

use std::path::PathBuf;

/// Resolve the platform config directory for the viewer
/// (e.g. `~/.config/orrery` on Linux). Falls back to the current
/// directory when the platform offers no config location.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("orrery"))
        .unwrap_or_else(|| PathBuf::from("."))
}
