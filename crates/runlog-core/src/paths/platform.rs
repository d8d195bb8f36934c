//! Platform-specific base directory detection and path normalization.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::LogError;

/// Name of the log subdirectory created under the base directory.
pub const LOG_DIR_NAME: &str = "log";

/// Get the base directory for the default log location.
///
/// Resolution order:
/// 1. Directory containing the running executable
/// 2. System data directory (e.g., `~/.local/share/runlog`)
/// 3. Current working directory
pub fn base_directory() -> Result<PathBuf, LogError> {
    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return Ok(dir);
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        return Ok(data_dir.join("runlog"));
    }

    env::current_dir().map_err(|_| LogError::NoBaseDirectory)
}

/// Default log directory: `<base directory>/log`.
pub fn default_log_directory() -> PathBuf {
    base_directory()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(LOG_DIR_NAME)
}

/// Make a configured path absolute, expanding a leading `~`.
pub fn absolutize(path: &Path) -> Result<PathBuf, LogError> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .ok_or(LogError::NoBaseDirectory)?
            .join(rest),
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| LogError::CurrentDir(e.to_string()))
    }
}
