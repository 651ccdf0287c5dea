//! Unified configuration schema.
//!
//! One YAML file drives the CLI and any embedding frontend. Every field has a
//! default so partial files (or no file at all) are valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Game mode and chance settings.
    #[serde(default)]
    pub game: GameConfig,
    /// Simulation defaults for the CLI.
    #[serde(default)]
    pub sim: SimConfig,
    /// NDJSON history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Single,
    Duel,
}

/// Game mode and chance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// "single" or "duel".
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Base seed for dice generation.
    #[serde(default)]
    pub seed: u64,
    /// If true, use the event-keyed deterministic dice stream; otherwise a
    /// seeded ChaCha8 stream.
    #[serde(default = "default_deterministic_chance")]
    pub deterministic_chance: bool,
}

fn default_mode() -> Mode {
    Mode::Single
}

fn default_deterministic_chance() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            seed: 0,
            deterministic_chance: default_deterministic_chance(),
        }
    }
}

/// Simulation defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Number of games per simulation run.
    #[serde(default = "default_sim_games")]
    pub games: u32,
    /// Print a score histogram after the run.
    #[serde(default = "default_sim_histogram")]
    pub histogram: bool,
}

fn default_sim_games() -> u32 {
    10_000
}

fn default_sim_histogram() -> bool {
    true
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: default_sim_games(),
            histogram: default_sim_histogram(),
        }
    }
}

/// NDJSON history configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Directory for history files. If None, no history is written.
    #[serde(default)]
    pub dir: Option<String>,
    /// Flush the history writer every N lines (0 disables periodic flushing).
    #[serde(default)]
    pub flush_every_lines: u64,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
