use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "settingsfile.json";

/// When buffered writes are committed to the backing medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlushPolicy {
    /// `close()` commits before returning.
    #[default]
    OnClose,
    /// `close()` only marks the bytes pending; the next open, forced close
    /// or drop commits them.
    Deferred,
}

impl fmt::Display for FlushPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushPolicy::OnClose => f.write_str("on-close"),
            FlushPolicy::Deferred => f.write_str("deferred"),
        }
    }
}

impl FromStr for FlushPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-close" => Ok(FlushPolicy::OnClose),
            "deferred" => Ok(FlushPolicy::Deferred),
            other => Err(ConfigError::InvalidValue {
                key: "flush".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Store configuration, stored as `settingsfile.json` in a config dir.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub flush: FlushPolicy,

    /// Whether file commits `fsync` the data before the rename.
    #[serde(default = "default_fsync")]
    pub fsync: bool,
}

fn default_fsync() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            flush: FlushPolicy::default(),
            fsync: default_fsync(),
        }
    }
}

impl StoreConfig {
    pub const KEYS: [&'static str; 2] = ["flush", "fsync"];

    /// Platform config dir, e.g. `~/.config/settingsfile` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "settingsfile", "settingsfile")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: StoreConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<(), ConfigError> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "flush" => Ok(self.flush.to_string()),
            "fsync" => Ok(self.fsync.to_string()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "flush" => self.flush = value.parse()?,
            "fsync" => {
                self.fsync = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
