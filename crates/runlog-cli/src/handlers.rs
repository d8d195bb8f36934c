//! Command handlers.
//!
//! Each handler takes an already-built sink so tests can point it at an
//! in-memory console.

use std::error::Error;
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;

use runlog_core::paths::{absolutize, log_file_path};
use runlog_core::{LogConfig, LogSink};

use crate::error::CliError;

/// Cause text given on the command line, logged as the exception.
#[derive(Debug)]
struct CauseText(String);

impl fmt::Display for CauseText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for CauseText {}

/// `runlog log`: one entry per message.
pub fn log(sink: &LogSink, messages: &[String]) {
    for message in messages {
        sink.log(message);
    }
}

/// `runlog error`: a single `ERROR: ...` entry.
pub fn error(sink: &LogSink, message: &str, cause: Option<&str>) {
    let cause = cause.map(|text| CauseText(text.to_string()));
    sink.log_error(message, cause.as_ref().map(|c| c as &(dyn Error + 'static)));
}

/// `runlog tee`: copy `input` through the captured console.
///
/// Returns the number of bytes copied.
pub fn tee(sink: &LogSink, mut input: impl Read) -> Result<u64, CliError> {
    let _capture = sink.capture_scope()?;
    let mut stream = sink.console().stream();
    let copied = std::io::copy(&mut input, &mut stream)?;
    stream.flush()?;
    tracing::debug!(bytes = copied, "Copied input through captured console");
    Ok(copied)
}

/// `runlog path`: where the sink would write, without creating anything.
pub fn path(config: &LogConfig) -> Result<PathBuf, CliError> {
    let directory = absolutize(&config.log_directory)?;
    Ok(log_file_path(&directory, &config.log_file))
}
