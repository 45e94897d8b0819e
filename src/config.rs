//! Configuration loading and management
//!
//! Handles parsing of `taskdeck.toml` files. The current directory is
//! checked first, then the platform config directory; a missing file means
//! defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const CONFIG_FILE: &str = "taskdeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the task snapshot path
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Timer configuration
    #[serde(default)]
    pub timer: TimerConfig,

    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Form configuration
    #[serde(default)]
    pub form: FormConfig,
}

/// Countdown timer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session duration in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

fn default_duration_secs() -> u64 {
    3600
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiescence window before a typed query commits, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Artificial minimum latency before a submit reaches the store,
    /// in milliseconds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay_ms() -> u64 {
    500
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the usual locations, defaulting when absent.
    ///
    /// Order: `taskdeck.toml` in the current directory, then the platform
    /// config directory.
    pub fn discover() -> Result<Self> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }
        if let Some(dirs) = ProjectDirs::from("", "", "taskdeck") {
            let path = dirs.config_dir().join(CONFIG_FILE);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_session_contract() {
        let config = Config::default();
        assert_eq!(config.timer.duration_secs, 3600);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.form.submit_delay_ms, 500);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdeck.toml");
        fs::write(&path, "[timer]\nduration_secs = 60\n").expect("write config");

        let config = Config::load(&path).expect("load");
        assert_eq!(config.timer.duration_secs, 60);
        assert_eq!(config.search.debounce_ms, 300);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdeck.toml");
        fs::write(&path, "timer = \"soon\"").expect("write config");

        assert!(Config::load(&path).is_err());
    }
}
