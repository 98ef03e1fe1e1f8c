//! Simulation configuration resource.
//!
//! Tunables for steering, time and debugging loaded from an INI file. Safe
//! defaults apply to every key the file leaves out.
//!
//! # Configuration File Format
//!
//! ```ini
//! [steering]
//! max_force = 1000
//! max_speed = 50
//! arrival_radius = 2
//!
//! [time]
//! time_scale = 1.0
//!
//! [debug]
//! enabled = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::{SimError, SimResult};

/// Default safe values for startup
const DEFAULT_MAX_FORCE: f32 = 1000.0;
const DEFAULT_MAX_SPEED: f32 = 50.0;
const DEFAULT_ARRIVAL_RADIUS: f32 = 2.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_DEBUG: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./tileworld.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Largest steering force magnitude.
    pub max_force: f32,
    /// Default speed limit for steered characters.
    pub max_speed: f32,
    /// Distance at which a path waypoint counts as reached.
    pub arrival_radius: f32,
    /// Multiplier applied to every tick duration.
    pub time_scale: f32,
    /// Insert [`DebugMode`](crate::resources::debugmode::DebugMode) when building the world.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            max_force: DEFAULT_MAX_FORCE,
            max_speed: DEFAULT_MAX_SPEED,
            arrival_radius: DEFAULT_ARRIVAL_RADIUS,
            time_scale: DEFAULT_TIME_SCALE,
            debug: DEFAULT_DEBUG,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> SimResult<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to load {:?}: {}", self.config_path, e)))?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> SimResult<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| SimError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> SimResult<()> {
        let float = |section: &str, key: &str| -> SimResult<Option<f32>> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| SimError::Config(format!("[{}] {}: {}", section, key, e)))
        };

        // [steering] section
        if let Some(v) = float("steering", "max_force")? {
            self.max_force = v;
        }
        if let Some(v) = float("steering", "max_speed")? {
            self.max_speed = v;
        }
        if let Some(v) = float("steering", "arrival_radius")? {
            self.arrival_radius = v;
        }

        // [time] section
        if let Some(v) = float("time", "time_scale")? {
            self.time_scale = v;
        }

        // [debug] section
        if let Some(enabled) = config
            .getbool("debug", "enabled")
            .map_err(|e| SimError::Config(format!("[debug] enabled: {}", e)))?
        {
            self.debug = enabled;
        }

        info!(
            "Loaded config: max_force={}, max_speed={}, arrival_radius={}, time_scale={}, debug={}",
            self.max_force, self.max_speed, self.arrival_radius, self.time_scale, self.debug
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> SimResult<()> {
        let mut config = Ini::new();

        // [steering] section
        config.set("steering", "max_force", Some(self.max_force.to_string()));
        config.set("steering", "max_speed", Some(self.max_speed.to_string()));
        config.set(
            "steering",
            "arrival_radius",
            Some(self.arrival_radius.to_string()),
        );

        // [time] section
        config.set("time", "time_scale", Some(self.time_scale.to_string()));

        // [debug] section
        config.set("debug", "enabled", Some(self.debug.to_string()));

        config.write(&self.config_path)?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
