//! Game configuration loaded once at startup.
//!
//! The configuration is a flat TOML table with kebab-case keys. It is parsed
//! into an immutable [`GameConfig`] that is threaded through construction of
//! every entity; nothing reads configuration from global state.

use crate::core::constants::{CONFIG_FILE_NAME, DEFAULT_ASSET_DIR};
use crate::utils::paths::flappy_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The reference configuration shipped at the repository root.
pub const REFERENCE_CONFIG: &str = include_str!("../../flappy.toml");

/// Configuration errors. All of them are fatal at startup.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no config file found (looked in: {})", format_candidates(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn format_candidates(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tunable game parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GameConfig {
    /// Frame width in pixels.
    pub width: i32,
    /// Frame height in pixels.
    pub height: i32,
    /// Ticks per second.
    pub refresh_rate: u32,
    /// Ticks between pipe pair spawns.
    pub pipe_spawn_rate: u64,
    /// Vertical gap between the two pipes of a pair.
    pub pipe_interval: i32,
    /// Background pixels per scroller update.
    pub background_speed: i32,
    /// Ground and pipe pixels per scroller update.
    pub base_speed: i32,
    /// Ground y position.
    pub base_height: i32,
    pub pipe_color: String,
    pub bird_color: String,
    /// Background variant (`day` or `night` in the standard sprite pack).
    pub time: String,
    /// Ticks per bird animation frame.
    pub bird_animation_interval: u32,
    pub gravity: f64,
    /// Damping coefficient applied to the bird's velocity each tick.
    pub speed_buffer: f64,
    /// Magnitude of the upward impulse from a flap.
    pub bird_fly_height: f64,

    /// Seed for the pipe RNG. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory holding the sprite pack.
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Find the config file: the explicit path if given, otherwise
    /// `./flappy.toml`, then `~/.flappy/flappy.toml`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let mut searched = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Ok(dir) = flappy_dir() {
            searched.push(dir.join(CONFIG_FILE_NAME));
        }

        match searched.iter().position(|p| p.is_file()) {
            Some(found) => Ok(searched.swap_remove(found)),
            None => Err(ConfigError::NotFound { searched }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        fn positive(key: &'static str, value: i64) -> Result<(), ConfigError> {
            if value > 0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("width", self.width as i64)?;
        positive("height", self.height as i64)?;
        positive("refresh-rate", self.refresh_rate as i64)?;
        positive(
            "pipe-spawn-rate",
            i64::try_from(self.pipe_spawn_rate).unwrap_or(i64::MAX),
        )?;
        positive(
            "bird-animation-interval",
            self.bird_animation_interval as i64,
        )?;
        // Scrollers and pipes only ever move left.
        positive("background-speed", self.background_speed as i64)?;
        positive("base-speed", self.base_speed as i64)?;

        if self.pipe_interval < 0 {
            return Err(ConfigError::Invalid {
                key: "pipe-interval",
                reason: format!("must not be negative, got {}", self.pipe_interval),
            });
        }

        for (key, value) in [
            ("gravity", self.gravity),
            ("speed-buffer", self.speed_buffer),
            ("bird-fly-height", self.bird_fly_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be a finite number".to_string(),
                });
            }
        }

        for (key, value) in [
            ("pipe-color", &self.pipe_color),
            ("bird-color", &self.bird_color),
            ("time", &self.time),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Target duration of one frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.refresh_rate
    }

    pub fn asset_dir(&self) -> PathBuf {
        self.asset_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR))
    }
}
