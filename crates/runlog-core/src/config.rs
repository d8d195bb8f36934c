//! Log sink configuration.
//!
//! A [`LogConfig`] is consumed once, when the sink is built. Values can come
//! from defaults, a JSON file, `RUNLOG_*` environment variables, or the
//! builder setters, in that order of precedence.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::paths::default_log_directory;

/// Default log file base name (without extension).
pub const DEFAULT_LOG_FILE: &str = "application";

/// Environment variable overriding the log directory.
pub const ENV_LOG_DIR: &str = "RUNLOG_DIR";
/// Environment variable overriding the log file base name.
pub const ENV_LOG_FILE: &str = "RUNLOG_FILE";
/// Environment variable toggling timestamps.
pub const ENV_TIMESTAMPS: &str = "RUNLOG_TIMESTAMPS";
/// Environment variable toggling console echo.
pub const ENV_CONSOLE: &str = "RUNLOG_CONSOLE";

/// Settings for a [`crate::LogSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory holding the log file.
    pub log_directory: PathBuf,

    /// Base name of the log file; `.log` is appended.
    pub log_file: String,

    /// Prefix each entry with `[YYYY-MM-DD HH:MM:SS]`.
    pub include_timestamps: bool,

    /// Mirror each entry to the console.
    pub write_to_console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            include_timestamps: true,
            write_to_console: true,
        }
    }
}

impl LogConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, LogError> {
        let content = fs::read_to_string(path).map_err(|e| LogError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = serde_json::from_str(&content).map_err(|e| LogError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded log configuration");
        Ok(config)
    }

    /// Apply `RUNLOG_*` environment overrides on top of this configuration.
    ///
    /// Boolean variables accept `1/0`, `true/false`, `yes/no` and `on/off`;
    /// anything else is ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = env::var_os(ENV_LOG_DIR).filter(|v| !v.is_empty()) {
            self.log_directory = PathBuf::from(dir);
        }
        if let Ok(file) = env::var(ENV_LOG_FILE) {
            if !file.trim().is_empty() {
                self.log_file = file.trim().to_string();
            }
        }
        if let Some(flag) = env_flag(ENV_TIMESTAMPS) {
            self.include_timestamps = flag;
        }
        if let Some(flag) = env_flag(ENV_CONSOLE) {
            self.write_to_console = flag;
        }
        self
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_directory = directory.into();
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file = name.into();
        self
    }

    #[must_use]
    pub const fn with_timestamps(mut self, enabled: bool) -> Self {
        self.include_timestamps = enabled;
        self
    }

    #[must_use]
    pub const fn with_console(mut self, enabled: bool) -> Self {
        self.write_to_console = enabled;
        self
    }
}

fn env_flag(key: &str) -> Option<bool> {
    parse_flag(&env::var(key).ok()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
