//! The writer capability shared by real consoles and redirectors.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ConsoleError;

/// Platform line terminator.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Text sink with console semantics.
///
/// Both the real terminal and [`super::LineBufferingRedirector`] implement
/// this, so the code holding a writer never needs to know which one it has.
pub trait ConsoleWriter: Send {
    /// Write a chunk of text.
    fn write_str(&mut self, chunk: &str) -> Result<(), ConsoleError>;

    /// Write a single character.
    fn write_char(&mut self, ch: char) -> Result<(), ConsoleError> {
        let mut buf = [0u8; 4];
        self.write_str(ch.encode_utf8(&mut buf))
    }

    /// Write the platform line terminator.
    fn write_line(&mut self) -> Result<(), ConsoleError> {
        self.write_str(LINE_ENDING)
    }

    /// Flush buffered output.
    fn flush(&mut self) -> Result<(), ConsoleError>;

    /// Flush and stop accepting output.
    fn close(&mut self) -> Result<(), ConsoleError> {
        self.flush()
    }
}

/// A writer that can be installed in, and shared out of, a console handle.
pub type SharedWriter = Arc<Mutex<dyn ConsoleWriter>>;

/// Wrap a writer for sharing.
pub fn shared<W: ConsoleWriter + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(writer))
}

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Console and log writes must keep working after an unrelated panic.
pub(crate) fn lock_recovering<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Adapts any byte stream into a [`ConsoleWriter`].
pub struct StreamWriter<W> {
    inner: W,
}

impl<W: Write + Send> StreamWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl StreamWriter<io::Stdout> {
    /// Writer over the process's real standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleWriter for StreamWriter<W> {
    fn write_str(&mut self, chunk: &str) -> Result<(), ConsoleError> {
        self.inner.write_all(chunk.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        self.inner.flush()?;
        Ok(())
    }
}

/// In-memory console, clonable so a test can keep a handle while the
/// writer itself is installed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<String>>,
    flushes: Arc<Mutex<usize>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        lock_recovering(&self.buffer).clone()
    }

    /// Number of `flush` calls received.
    pub fn flush_count(&self) -> usize {
        *lock_recovering(&self.flushes)
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        lock_recovering(&self.buffer).clear();
    }
}

impl ConsoleWriter for MemoryWriter {
    fn write_str(&mut self, chunk: &str) -> Result<(), ConsoleError> {
        lock_recovering(&self.buffer).push_str(chunk);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        *lock_recovering(&self.flushes) += 1;
        Ok(())
    }
}
