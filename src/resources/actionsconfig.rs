//! Scheduler configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are safe for
//! startup; missing keys keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [actions]
//! max_immediate_steps = 1024
//! default_easing = easeInOutQuad
//! random_seed = 42
//!
//! [time]
//! time_scale = 1.0
//! max_delta = 0.25
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::easing::Easing;
use crate::error::ActionError;

const DEFAULT_MAX_IMMEDIATE_STEPS: usize = 1024;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_MAX_DELTA: f32 = 0.25;
const DEFAULT_CONFIG_PATH: &str = "./actions.ini";

/// Scheduler configuration.
///
/// Used to build a [`Registry`](crate::actions::Registry) and, as an ECS
/// resource, by [`update_world_time`](crate::systems::time::update_world_time)
/// to clamp and scale frame deltas.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ActionsConfig {
    /// Upper bound on immediate steps (callbacks, delays) drained by one queue
    /// in a single tick.
    pub max_immediate_steps: usize,
    /// Easing used by transition entries that do not name one.
    pub default_easing: Easing,
    /// Seed for the random source behind `flicker`. `None` seeds from entropy.
    pub random_seed: Option<u64>,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Largest unscaled frame delta accepted, in seconds. `0` disables the clamp.
    pub max_delta: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionsConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            max_immediate_steps: DEFAULT_MAX_IMMEDIATE_STEPS,
            default_easing: Easing::default(),
            random_seed: None,
            time_scale: DEFAULT_TIME_SCALE,
            max_delta: DEFAULT_MAX_DELTA,
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

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Fails if the file cannot
    /// be read or parsed, or names an unknown easing.
    pub fn load_from_file(&mut self) -> Result<(), ActionError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| ActionError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ActionError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| ActionError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ActionError> {
        // [actions] section
        if let Some(steps) = config.getuint("actions", "max_immediate_steps").ok().flatten() {
            self.max_immediate_steps = (steps as usize).max(1);
        }
        if let Some(name) = config.get("actions", "default_easing") {
            self.default_easing = name.trim().parse()?;
        }
        if let Some(seed) = config.getuint("actions", "random_seed").ok().flatten() {
            self.random_seed = Some(seed);
        }

        // [time] section
        if let Some(scale) = config.getfloat("time", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(max_delta) = config.getfloat("time", "max_delta").ok().flatten() {
            self.max_delta = (max_delta as f32).max(0.0);
        }

        info!(
            "Loaded actions config: max_immediate_steps={}, default_easing={}, seed={:?}, time_scale={}, max_delta={}",
            self.max_immediate_steps,
            self.default_easing,
            self.random_seed,
            self.time_scale,
            self.max_delta
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ActionError> {
        let mut config = Ini::new();

        // [actions] section
        config.set(
            "actions",
            "max_immediate_steps",
            Some(self.max_immediate_steps.to_string()),
        );
        config.set(
            "actions",
            "default_easing",
            Some(self.default_easing.to_string()),
        );
        if let Some(seed) = self.random_seed {
            config.set("actions", "random_seed", Some(seed.to_string()));
        }

        // [time] section
        config.set("time", "time_scale", Some(self.time_scale.to_string()));
        config.set("time", "max_delta", Some(self.max_delta.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| ActionError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved actions config to {:?}", self.config_path);

        Ok(())
    }
}
