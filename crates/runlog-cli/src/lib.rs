//! Command-line front end for `runlog-core`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dependencies used by the binary entry point
use anyhow as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{bootstrap, resolve_config};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
