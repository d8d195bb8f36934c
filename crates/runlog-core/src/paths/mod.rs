//! Log file location: base directory detection, directory creation, and
//! per-run file reset.
//!
//! # Design
//!
//! - Returns `PathBuf` and `LogError` for clear error handling
//! - OS-specific lookups are kept in `platform`

mod ensure;
mod platform;

use std::path::{Path, PathBuf};

pub use ensure::{ensure_log_directory, remove_stale_log};
pub use platform::{LOG_DIR_NAME, absolutize, base_directory, default_log_directory};

/// Extension appended to the configured base name.
pub const LOG_EXTENSION: &str = "log";

/// Compute `<directory>/<base_name>.log`.
pub fn log_file_path(directory: &Path, base_name: &str) -> PathBuf {
    directory.join(format!("{base_name}.{LOG_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_appends_extension() {
        let path = log_file_path(Path::new("/var/tmp/log"), "application");
        assert_eq!(path, PathBuf::from("/var/tmp/log/application.log"));
    }

    #[test]
    fn dotted_base_names_keep_their_dots() {
        let path = log_file_path(Path::new("/tmp"), "worker.1");
        assert_eq!(path.file_name().unwrap(), "worker.1.log");
    }
}
