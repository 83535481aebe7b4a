//! Run configuration for the evolutionary painter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level run configuration.
///
/// Read once at startup; the driver never re-reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainterConfig {
    /// Path of the image to approximate.
    #[serde(default = "default_reference")]
    pub reference: PathBuf,
    /// Population and selection sizes.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Periodic survivor dumps.
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            population: PopulationConfig::default(),
            checkpoint: CheckpointConfig::default(),
            random_seed: None,
        }
    }
}

fn default_reference() -> PathBuf {
    PathBuf::from("obraz.png")
}

/// Population settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of specimens (N).
    #[serde(default = "default_specimens")]
    pub specimens: usize,
    /// Number of survivors kept each generation (K).
    #[serde(default = "default_survivors")]
    pub survivors: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            specimens: default_specimens(),
            survivors: default_survivors(),
        }
    }
}

fn default_specimens() -> usize {
    150
}
fn default_survivors() -> usize {
    10
}

/// Checkpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Dump survivors every N generations, starting at generation 0.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Directory receiving checkpoint images.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_interval() -> u64 {
    1
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("new-images")
}

impl PainterConfig {
    /// Validate configuration parameters.
    ///
    /// Invalid sizes are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PopulationConfig {
            specimens,
            survivors,
        } = self.population;
        if specimens == 0 {
            return Err(ConfigError::NoSpecimens);
        }
        if survivors == 0 {
            return Err(ConfigError::NoSurvivors);
        }
        if survivors > specimens {
            return Err(ConfigError::TooManySurvivors {
                survivors,
                specimens,
            });
        }
        if self.checkpoint.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Specimen count must be non-zero")]
    NoSpecimens,
    #[error("Survivor count must be non-zero")]
    NoSurvivors,
    #[error("Survivor count {survivors} exceeds specimen count {specimens}")]
    TooManySurvivors { survivors: usize, specimens: usize },
    #[error("Checkpoint interval must be non-zero")]
    ZeroInterval,
}
