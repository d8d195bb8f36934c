//! Per-run log file sink with console capture.
//!
//! [`LogSink`] writes timestamped entries to `<directory>/<name>.log`,
//! recreating the file once per run, and optionally mirrors them to the
//! console. While capturing, everything printed through the
//! [`ConsoleOutput`] handle is shown as usual and also logged line by line
//! as `[Console] ...`.
//!
//! ```no_run
//! use runlog_core::{LogConfig, LogSink, console_println};
//!
//! let sink = LogSink::new(LogConfig::default().with_file_name("worker"))?;
//! sink.log("starting");
//!
//! let _capture = sink.capture_scope()?;
//! console_println!("this line is shown and logged");
//! # Ok::<(), runlog_core::LogError>(())
//! ```
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod console;
pub mod error;
pub mod paths;
pub mod ports;
pub mod sink;

#[cfg(test)]
mod test_utils;

pub use config::{DEFAULT_LOG_FILE, LogConfig};
pub use console::{
    CONSOLE_PREFIX, ConsoleMakeWriter, ConsoleOutput, ConsoleStream, ConsoleWriter,
    LineBufferingRedirector, MemoryWriter, SharedWriter, StreamWriter,
};
pub use error::{ConsoleError, LogError, LogResult};
pub use ports::LineSink;
pub use sink::{CaptureGuard, LogSink, TIMESTAMP_FORMAT, format_entry, format_error};
