//! Aquarium configuration (RON)
//!
//! Все параметры симуляции в одном месте: tank envelope, navigator tuning,
//! spawn weights and population. Every section has `#[serde(default)]`, so a
//! config file only needs the keys it overrides.
//!
//! ```ron
//! (
//!     seed: 7,
//!     tank: (center: (0.0, 2.0, 0.0), size: (12.0, 4.0, 6.0)),
//!     spawning: (weights: (common: 60, rare: 30, epic: 10), initial_population: 12),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::rarity::RarityWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tank envelope (axis-aligned box fish swim in)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 2.5, 0.0],
            size: [10.0, 4.0, 6.0],
        }
    }
}

/// Navigator tuning (shared by all fish)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance below which a waypoint counts as reached
    pub reach_threshold: f32,
    /// Turn smoothing gain (slerp factor per second)
    pub rotation_gain: f32,
    /// Shortest time spent on one waypoint before a forced retarget (seconds)
    pub min_waypoint_time: f32,
    /// Liveness bound: longest time on one waypoint (seconds)
    pub max_waypoint_time: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            reach_threshold: 0.5,
            rotation_gain: 2.0,
            min_waypoint_time: 3.0,
            max_waypoint_time: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawningConfig {
    pub weights: RarityWeights,
    /// Fish spawned on startup
    pub initial_population: usize,
    /// Tank capacity (`None` = unlimited)
    pub max_population: Option<usize>,
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            weights: RarityWeights::default(),
            initial_population: 8,
            max_population: Some(64),
        }
    }
}

/// Root config (resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumConfig {
    /// Seed for `DeterministicRng`
    pub seed: u64,
    pub tank: TankConfig,
    pub navigation: NavigationConfig,
    pub spawning: SpawningConfig,
    /// Optional RON catalog file (built-in stock when absent). Relative
    /// paths are resolved against the config file's directory.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tank: TankConfig::default(),
            navigation: NavigationConfig::default(),
            spawning: SpawningConfig::default(),
            catalog_path: None,
        }
    }
}

impl AquariumConfig {
    /// `catalog_path` resolved for a config loaded from `config_file`
    pub fn resolve_catalog_path(&self, config_file: Option<&Path>) -> Option<PathBuf> {
        let catalog = self.catalog_path.as_deref()?;
        let base = config_file.and_then(Path::parent);

        match base {
            Some(dir) if catalog.is_relative() => Some(dir.join(catalog)),
            _ => Some(catalog.to_path_buf()),
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tank.center.iter().any(|axis| !axis.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "tank center must be finite, got {:?}",
                self.tank.center
            )));
        }
        if self.tank.size.iter().any(|&axis| !axis.is_finite() || !(axis >= 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "tank size must be finite and non-negative, got {:?}",
                self.tank.size
            )));
        }

        let nav = &self.navigation;
        // NaN проходит любые сравнения, поэтому сначала is_finite
        let fields = [
            ("reach_threshold", nav.reach_threshold),
            ("rotation_gain", nav.rotation_gain),
            ("min_waypoint_time", nav.min_waypoint_time),
            ("max_waypoint_time", nav.max_waypoint_time),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }

        if !(nav.reach_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "reach_threshold must be positive, got {}",
                nav.reach_threshold
            )));
        }
        if !(nav.rotation_gain >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rotation_gain must be non-negative, got {}",
                nav.rotation_gain
            )));
        }
        if !(nav.min_waypoint_time >= 0.0 && nav.min_waypoint_time <= nav.max_waypoint_time) {
            return Err(ConfigError::Invalid(format!(
                "waypoint time range {}..={} is empty or negative",
                nav.min_waypoint_time, nav.max_waypoint_time
            )));
        }

        if self.spawning.weights.total() == 0 {
            return Err(ConfigError::Invalid("all rarity weights are zero".to_string()));
        }

        Ok(())
    }
}

/// Load + validate a config file
pub fn load_config(path: &Path) -> Result<AquariumConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<AquariumConfig, ConfigError> {
    let config: AquariumConfig = ron::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Save config (pretty RON), e.g. to seed a config file with defaults
pub fn save_config(path: &Path, config: &AquariumConfig) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
    let text = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, text)?;
    Ok(())
}
