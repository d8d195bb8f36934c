//! CLI-specific error types and mappings.
//!
//! This module provides the CLI error type and its mapping from
//! [`LogError`] to exit codes and user-facing messages.

use runlog_core::LogError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Log sink error.
    #[error("{0}")]
    Log(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Log(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<LogError> for CliError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::ConfigRead { .. } | LogError::ConfigParse { .. } => {
                Self::Config(err.to_string())
            }
            LogError::CreateDirectory { .. }
            | LogError::NotADirectory(_)
            | LogError::RemoveStaleLog { .. }
            | LogError::CurrentDir(_)
            | LogError::NoBaseDirectory => Self::Io(err.to_string()),
            LogError::ConsoleBusy | LogError::Console(_) => Self::Log(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
