//! The per-run log file sink.
//!
//! A [`LogSink`] owns one log file, recreated when the sink is built, and
//! serializes every append through a single lock. It can also capture a
//! [`ConsoleOutput`]: the console writer is swapped for a
//! [`LineBufferingRedirector`] whose complete lines come back here as
//! `[Console] ...` entries.
//!
//! # Lock order
//!
//! `write_lock` is taken before `capture`, and `capture` is never held while
//! a writer runs. Nothing on the append path emits `tracing` events: a
//! subscriber printing to the console would re-enter the sink.

mod capture;
mod entry;

use std::error::Error;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};

use crate::config::LogConfig;
use crate::console::{
    ConsoleOutput, ConsoleWriter, LINE_ENDING, LineBufferingRedirector, SharedWriter,
    lock_recovering,
};
use crate::error::{LogError, LogResult};
use crate::paths::{absolutize, ensure_log_directory, log_file_path, remove_stale_log};
use crate::ports::LineSink;

pub use capture::CaptureGuard;
pub use entry::{TIMESTAMP_FORMAT, format_entry, format_entry_at, format_error};

/// Thread-safe, timestamped logging to a fresh file per run.
///
/// Dropping the sink stops any active console capture.
pub struct LogSink {
    core: Arc<SinkCore>,
}

/// Active capture: the writer that was replaced and the redirector
/// standing in for it.
struct Capture {
    original: SharedWriter,
    redirector: Arc<Mutex<LineBufferingRedirector>>,
}

struct SinkCore {
    config: LogConfig,
    path: PathBuf,
    console: Arc<ConsoleOutput>,
    write_lock: Mutex<()>,
    capture: Mutex<Option<Capture>>,
}

impl LogSink {
    /// Build a sink over the process-wide console handle.
    ///
    /// Creates the log directory if needed and deletes any log left by a
    /// previous run. Both failures are returned; nothing is logged until the
    /// sink exists.
    pub fn new(config: LogConfig) -> LogResult<Self> {
        Self::with_console(config, ConsoleOutput::global())
    }

    /// Build a sink with [`LogConfig::default`].
    pub fn with_defaults() -> LogResult<Self> {
        Self::new(LogConfig::default())
    }

    /// Build a sink that echoes to and captures `console`.
    pub fn with_console(config: LogConfig, console: Arc<ConsoleOutput>) -> LogResult<Self> {
        let directory = absolutize(&config.log_directory)?;
        if let Err(e) = ensure_log_directory(&directory) {
            eprintln!("An error occurred while creating log directory: {e}");
            return Err(e);
        }

        let path = log_file_path(&directory, &config.log_file);
        if let Err(e) = remove_stale_log(&path) {
            eprintln!("An error occurred while deleting old log: {e}");
            return Err(e);
        }

        tracing::debug!(
            path = %path.display(),
            timestamps = config.include_timestamps,
            console = config.write_to_console,
            "Log sink ready"
        );

        Ok(Self {
            core: Arc::new(SinkCore {
                config,
                path,
                console,
                write_lock: Mutex::new(()),
                capture: Mutex::new(None),
            }),
        })
    }

    /// Absolute path of the log file.
    pub fn path(&self) -> &Path {
        &self.core.path
    }

    pub fn config(&self) -> &LogConfig {
        &self.core.config
    }

    /// The console handle this sink echoes to and captures.
    pub fn console(&self) -> &Arc<ConsoleOutput> {
        &self.core.console
    }

    /// Append `message` to the log file and, if configured, the console.
    ///
    /// Never fails: a write error is reported on stderr and the entry is
    /// dropped.
    pub fn log(&self, message: &str) {
        self.core.write_entry(message);
    }

    /// Log `ERROR: {message}` with the cause and its source chain.
    pub fn log_error(&self, message: &str, cause: Option<&(dyn Error + 'static)>) {
        self.core.write_entry(&format_error(message, cause));
    }

    /// Route the console through a redirector so everything printed is
    /// also logged as `[Console] ...`.
    ///
    /// Calling this while this sink is already capturing does nothing.
    /// Fails with [`LogError::ConsoleBusy`] if another sink holds the console.
    pub fn capture_console_output(&self) -> LogResult<()> {
        self.start_capture().map(|_| ())
    }

    /// Start capturing. Returns `false` if this sink was already capturing.
    fn start_capture(&self) -> LogResult<bool> {
        let mut slot = lock_recovering(&self.core.capture);
        if slot.is_some() {
            return Ok(false);
        }
        if !self.core.console.try_begin_capture() {
            return Err(LogError::ConsoleBusy);
        }

        let original = self.core.console.current();
        let sink: Weak<dyn LineSink> = Arc::downgrade(&self.core) as Weak<dyn LineSink>;
        let redirector = Arc::new(Mutex::new(LineBufferingRedirector::new(
            Arc::clone(&original),
            sink,
        )));

        // Record the echo target before the redirector becomes reachable.
        *slot = Some(Capture {
            original,
            redirector: Arc::clone(&redirector),
        });
        self.core.console.replace(redirector);
        drop(slot);

        tracing::debug!(path = %self.core.path.display(), "Console capture started");
        Ok(true)
    }

    /// Restore the console writer replaced by [`Self::capture_console_output`].
    ///
    /// A partial line still buffered in the redirector is logged. Does
    /// nothing when not capturing.
    pub fn stop_capture_console_output(&self) {
        let capture = {
            let mut slot = lock_recovering(&self.core.capture);
            let Some(capture) = slot.take() else {
                return;
            };
            // Restore while the slot is still held: a concurrent log call
            // then sees either the capture or the restored writer, never
            // the redirector as its echo target.
            self.core.console.replace(Arc::clone(&capture.original));
            capture
        };

        if let Err(e) = lock_recovering(&capture.redirector).close() {
            eprintln!("An error occurred while flushing captured console output: {e}");
        }
        self.core.console.end_capture();

        tracing::debug!(path = %self.core.path.display(), "Console capture stopped");
    }

    pub fn is_capturing(&self) -> bool {
        lock_recovering(&self.core.capture).is_some()
    }

    /// Capture the console until the returned guard is dropped.
    ///
    /// If this sink is already capturing, the guard leaves that capture
    /// running when dropped.
    pub fn capture_scope(&self) -> LogResult<CaptureGuard<'_>> {
        let started = self.start_capture()?;
        Ok(CaptureGuard::new(self, started))
    }

    /// Tear down: stop capture. Safe to call more than once.
    pub fn close(&self) {
        self.stop_capture_console_output();
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSink")
            .field("path", &self.core.path)
            .field("config", &self.core.config)
            .field("capturing", &self.is_capturing())
            .finish()
    }
}

impl SinkCore {
    fn write_entry(&self, message: &str) {
        let _guard = lock_recovering(&self.write_lock);

        let line = format_entry(message, self.config.include_timestamps);
        if let Err(e) = self.append(&line) {
            eprintln!(
                "Error occurred while writing to log {}: {e}",
                self.path.display()
            );
        }

        if self.config.write_to_console {
            let target = self.echo_target();
            let mut writer = lock_recovering(&target);
            let echoed = writer.write_str(&line).and_then(|()| writer.write_line());
            if let Err(e) = echoed {
                eprintln!("Error occurred while writing log entry to console: {e}");
            }
        }
    }

    /// Open, append, close. No descriptor outlives the call.
    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut entry = String::with_capacity(line.len() + LINE_ENDING.len());
        entry.push_str(line);
        entry.push_str(LINE_ENDING);
        file.write_all(entry.as_bytes())
    }

    /// The writer replaced by capture if capturing, else the current console writer.
    fn echo_target(&self) -> SharedWriter {
        lock_recovering(&self.capture).as_ref().map_or_else(
            || self.console.current(),
            |capture| Arc::clone(&capture.original),
        )
    }
}

impl LineSink for SinkCore {
    fn log(&self, message: &str) {
        self.write_entry(message);
    }
}
