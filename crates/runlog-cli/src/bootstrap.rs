//! CLI bootstrap - the composition root.
//!
//! Assembles the [`LogConfig`] from its sources and builds the sink.
//! Precedence, lowest first: defaults, `--config` file, `RUNLOG_*`
//! environment variables, command-line flags.

use runlog_core::{LogConfig, LogSink};

use crate::error::CliError;
use crate::parser::Cli;

/// Resolve the effective configuration for this invocation.
pub fn resolve_config(cli: &Cli) -> Result<LogConfig, CliError> {
    let base = match &cli.config {
        Some(path) => LogConfig::load(path)?,
        None => LogConfig::default(),
    };
    let mut config = base.with_env_overrides();

    if let Some(dir) = &cli.log_dir {
        config.log_directory.clone_from(dir);
    }
    if let Some(name) = &cli.log_file {
        config.log_file.clone_from(name);
    }
    if cli.no_timestamps {
        config.include_timestamps = false;
    }
    if cli.no_console {
        config.write_to_console = false;
    }

    validate_file_name(&config.log_file)?;
    Ok(config)
}

/// Build the sink over the process-wide console.
pub fn bootstrap(config: LogConfig) -> Result<LogSink, CliError> {
    Ok(LogSink::new(config)?)
}

fn validate_file_name(name: &str) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::Arguments("log file name cannot be empty".to_string()));
    }
    if name.contains(['/', '\\']) {
        return Err(CliError::Arguments(format!(
            "log file name '{name}' must not contain path separators; use --log-dir"
        )));
    }
    Ok(())
}
