//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Surface locomotion tuning.
    pub locomotion: LocomotionConfig,
    /// Solar system simulation settings.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Window title.
    pub title: String,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Mouse sensitivity in radians per pixel of mouse delta.
    pub mouse_sensitivity: f32,
    /// Invert Y axis for camera look.
    pub invert_y: bool,
}

/// Tuning for first-person surface locomotion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Walking speed in scene length units per second.
    pub walk_speed: f32,
    /// Multiplier applied to walk speed while sprinting.
    pub sprint_multiplier: f32,
    /// Clearance held between the player anchor and the planet surface.
    pub surface_offset: f32,
    /// Per-frame exponential decay applied to residual velocity when no
    /// movement key is held (released keys decelerate, not stop dead).
    pub friction: f32,
    /// Upper bound on a single integration step in seconds. Host `dt`
    /// spikes (tab refocus, debugger pauses) are clamped to this.
    pub max_step: f32,
}

/// Solar system simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Global multiplier on orbital angular speed.
    pub orbit_speed_scale: f32,
    /// Start with orbital motion paused (planets still spin).
    pub start_paused: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log a player HUD snapshot once per second while walking.
    pub log_hud: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            invert_y: false,
        }
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_multiplier: 1.5,
            surface_offset: 0.1,
            friction: 0.8,
            max_step: 0.1,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            orbit_speed_scale: 1.0,
            start_paused: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_hud: true,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
