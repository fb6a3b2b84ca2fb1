//! Session configuration, loaded once at startup.

use crate::constants;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tuning for one world session.
///
/// Loaded from a TOML file at startup or built with [`Default`]; immutable
/// for the rest of the process. Every field falls back to the reference
/// values in [`constants`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Noise frequency applied to cell coordinates before sampling.
    pub frequency: f64,
    /// Half-width of the synthesized square region, in cells.
    pub region_extent: i32,
    /// Normalized noise at or below this is a wall.
    pub wall_threshold: f64,
    /// Tile name generated walls put on the ground layer.
    pub wall_tile: String,
    /// Tile name used on the solids mask for blocking cells.
    pub solid_tile: String,
    /// Tile name drawn for player markers.
    pub player_tile: String,
    /// Directory holding the snapshot chain.
    pub saves_dir: PathBuf,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            frequency: constants::NOISE_FREQUENCY,
            region_extent: constants::REGION_EXTENT,
            wall_threshold: constants::WALL_THRESHOLD,
            wall_tile: constants::DEFAULT_WALL_TILE.to_string(),
            solid_tile: constants::DEFAULT_SOLID_TILE.to_string(),
            player_tile: constants::DEFAULT_PLAYER_TILE.to_string(),
            saves_dir: PathBuf::from(constants::DEFAULT_SAVES_DIR),
        }
    }
}

impl WorldConfig {
    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Why a config file failed to load.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid config document.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
