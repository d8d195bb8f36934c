//! Error types for the log sink and the console handle.
//!
//! Only construction-time failures surface as [`LogError`]; the steady-state
//! `log` path reports disk trouble on stderr and never returns an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by console writers.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The underlying stream rejected the write.
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConsoleError> for std::io::Error {
    fn from(err: ConsoleError) -> Self {
        let ConsoleError::Io(e) = err;
        e
    }
}

/// Errors that can occur while setting up or configuring a log sink.
#[derive(Debug, Error)]
pub enum LogError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory {path}: {reason}")]
    CreateDirectory { path: PathBuf, reason: String },

    /// The configured log directory exists but is not a directory.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to delete the log file left over from a previous run.
    #[error("Failed to delete old log {path}: {reason}")]
    RemoveStaleLog { path: PathBuf, reason: String },

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(String),

    /// No usable base directory for the default log location.
    #[error("Cannot determine base directory for logs")]
    NoBaseDirectory,

    /// Failed to read a configuration file.
    #[error("Failed to read config {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    /// A configuration file was not valid JSON for [`crate::LogConfig`].
    #[error("Invalid config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Another sink already holds the console.
    #[error("Console output is already captured by another sink")]
    ConsoleBusy,

    /// Console writer failure during capture setup.
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

/// Result alias used across the crate.
pub type LogResult<T> = Result<T, LogError>;
