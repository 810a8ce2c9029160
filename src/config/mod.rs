//! Launch-time configuration.
//!
//! Tuning that players may want to tweak lives here; gameplay constants stay
//! next to the code that uses them. The file is optional: a missing
//! `kindle.ron` means defaults, a broken one logs a warning and also means
//! defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "kindle.ron";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where the three save slots live.
    pub save_path: PathBuf,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Enables the free-crafting toggle.
    pub dev_tools: bool,
    pub starting_fire: f32,
    pub fire_decay_per_tick: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("savegame.json"),
            seed: None,
            dev_tools: true,
            starting_fire: 100.0,
            fire_decay_per_tick: 0.005,
        }
    }
}

impl GameConfig {
    /// Deterministic config for tests and replays.
    pub fn seeded(seed: u64, save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|e| format!("Config parse failed: {}", e))
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|e| format!("Config serialization failed: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
        Self::from_ron(&text)
    }

    /// Reads `path` if it exists, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("[Config] Loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!("[Config] {}. Using defaults.", e);
                Self::default()
            }
        }
    }
}
