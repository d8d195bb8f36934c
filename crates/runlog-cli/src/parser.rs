//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the per-run log sink.
///
/// Global options override the config file and `RUNLOG_*` environment
/// variables.
#[derive(Parser)]
#[command(name = "runlog")]
#[command(about = "Write and capture per-run log files")]
#[command(version)]
pub struct Cli {
    /// JSON config file with log settings
    #[arg(long, global = true, env = "RUNLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the log file
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log file base name (".log" is appended)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<String>,

    /// Omit the [YYYY-MM-DD HH:MM:SS] prefix
    #[arg(long = "no-timestamps", global = true)]
    pub no_timestamps: bool,

    /// Do not mirror entries to the console
    #[arg(long = "no-console", global = true)]
    pub no_console: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
