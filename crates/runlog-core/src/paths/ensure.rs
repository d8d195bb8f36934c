//! Directory creation and stale log removal.
//!
//! Both operations run once, while a sink is being constructed, and their
//! failures are fatal: a sink without a directory or with last run's
//! content still in place must not be handed to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::LogError;

/// Ensure the log directory exists, creating it and its parents if missing.
///
/// An existing path that is not a directory is rejected.
pub fn ensure_log_directory(path: &Path) -> Result<(), LogError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(LogError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|e| LogError::CreateDirectory {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Created log directory");
    Ok(())
}

/// Delete the file at `path` if one exists.
///
/// Returns `true` when a file was removed.
pub fn remove_stale_log(path: &Path) -> Result<bool, LogError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed log from previous run");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LogError::RemoveStaleLog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("log");

        ensure_log_directory(&nested).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn existing_directory_is_accepted() {
        let temp = tempdir().unwrap();
        ensure_log_directory(temp.path()).unwrap();
        assert!(temp.path().is_dir());
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("log");
        fs::write(&blocker, "not a dir").unwrap();

        let err = ensure_log_directory(&blocker).unwrap_err();
        assert!(matches!(err, LogError::NotADirectory(p) if p == blocker));
    }

    #[test]
    fn directory_under_a_file_fails_to_create() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = ensure_log_directory(&blocker.join("log")).unwrap_err();
        assert!(matches!(err, LogError::CreateDirectory { .. }));
    }

    #[test]
    fn stale_log_is_removed() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("application.log");
        fs::write(&file, "old run\n").unwrap();

        assert!(remove_stale_log(&file).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn missing_log_is_not_an_error() {
        let temp = tempdir().unwrap();
        assert!(!remove_stale_log(&temp.path().join("absent.log")).unwrap());
    }

    #[test]
    fn directory_at_log_path_cannot_be_removed() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("application.log");
        fs::create_dir(&dir).unwrap();

        let err = remove_stale_log(&dir).unwrap_err();
        assert!(matches!(err, LogError::RemoveStaleLog { .. }));
    }
}
