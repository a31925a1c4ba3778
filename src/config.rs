use crate::grid::{GRID_SIZE, MIN_GRID_SIZE};
use crate::input::DEFAULT_QUEUE_CAPACITY;
use crate::persistence::DEFAULT_SAVE_PATH;
use crate::scheduler::{DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_TICKS_PER_SECOND};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "snake_config.json";
pub const CONFIG_ENV: &str = "SNAKE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a session. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board edge in cells.
    pub grid_size: i32,
    /// Pixel size of a cell in the initial window.
    pub cell_size: f32,
    pub ticks_per_second: u32,
    pub max_ticks_per_frame: u32,
    pub input_queue_capacity: usize,
    /// Food RNG seed; taken from the clock when absent.
    pub seed: Option<u64>,
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: 8.0,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            input_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            seed: None,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }
}

impl GameConfig {
    /// Loads from `$SNAKE_CONFIG` or `snake_config.json`, falling back to
    /// defaults when the file is missing or unusable.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    /// Missing file means defaults; anything else wrong is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be positive".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid("max_ticks_per_frame must be positive".into()));
        }
        if self.input_queue_capacity == 0 {
            return Err(ConfigError::Invalid("input_queue_capacity must be positive".into()));
        }
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        Ok(())
    }

    /// Window edge in pixels for the board alone.
    pub fn board_pixels(&self) -> f32 {
        self.cell_size * self.grid_size as f32
    }
}
