//! Runtime-tunable simulation settings.
//!
//! Every field has a default, so a config file only needs the values
//! it overrides:
//!
//! ```json
//! { "initial_mode": "day", "grab_distance": 0.3, "seed": 7 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Mode;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Mode loaded by `Session::start`.
    pub initial_mode: Mode,
    pub grab_distance: f32,
    /// Player translation per frame.
    pub move_speed: f32,
    /// Projectile displacement per frame.
    pub projectile_speed: f32,
    pub pointer_range: f32,
    pub fragment_count: usize,
    pub fragment_gravity: f32,
    pub fragment_spread: f32,
    /// Population caps; 0 disables the cap. Oldest entries go first.
    pub max_targets: usize,
    pub max_projectiles: usize,
    pub max_fragments: usize,
    /// Fixed RNG seed. `None` seeds from the OS (normal play).
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Night,
            grab_distance: GRAB_DISTANCE,
            move_speed: MOVE_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            pointer_range: POINTER_RANGE,
            fragment_count: FRAGMENT_BURST,
            fragment_gravity: FRAGMENT_GRAVITY,
            fragment_spread: FRAGMENT_SPREAD,
            max_targets: MAX_TARGETS,
            max_projectiles: MAX_PROJECTILES,
            max_fragments: MAX_FRAGMENTS,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Same config with a fixed seed (tests).
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// `Some(cap)` when the cap is enabled.
pub fn cap(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}
