//! Editor configuration.
//!
//! # Responsibility
//! - Hold tunables for history and new-record defaults.
//! - Load overrides from JSON with every key optional.
//!
//! # Invariants
//! - `history.capacity` is at least 1.
//! - Missing keys fall back to `Default` values.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Environment variable the CLI reads to locate a JSON config file.
pub const CONFIG_PATH_ENV: &str = "NARRATIVE_CONFIG";

const DEFAULT_HISTORY_CAPACITY: usize = 50;
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub defaults: RecordDefaults,
}

/// Undo/redo log tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots, seed included.
    pub capacity: usize,
    /// Pushes closer than this to the previous accepted push are dropped.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl HistoryConfig {
    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Values stamped onto new records when a draft leaves a field empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDefaults {
    pub creator: String,
    pub game_status: String,
    pub asset_status: String,
    pub wwise_status: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            creator: "User".to_string(),
            game_status: "Not Started".to_string(),
            asset_status: "Not Started".to_string(),
            wwise_status: "Not Implemented".to_string(),
        }
    }
}

/// Error raised while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(details) => write!(f, "invalid config: {details}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl EditorConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Loads from `NARRATIVE_CONFIG` when set and non-blank, else defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_path(raw.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid("history.capacity must be >= 1"));
        }
        Ok(())
    }
}
