//! The swappable console handle standing in for standard output.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use super::writer::{SharedWriter, StreamWriter, lock_recovering, shared};
use crate::error::ConsoleError;

/// Process-wide console handle
static GLOBAL: LazyLock<Arc<ConsoleOutput>> = LazyLock::new(|| Arc::new(ConsoleOutput::stdout()));

/// Holder of the writer that currently receives console output.
///
/// Code that prints through a `ConsoleOutput` (directly, through
/// [`crate::console_println!`], or through [`ConsoleOutput::stream`]) goes
/// wherever the installed writer sends it. Capture swaps the writer for a
/// redirector and later puts the exact previous one back.
pub struct ConsoleOutput {
    current: Mutex<SharedWriter>,
    captured: AtomicBool,
}

impl ConsoleOutput {
    pub fn new(writer: SharedWriter) -> Self {
        Self {
            current: Mutex::new(writer),
            captured: AtomicBool::new(false),
        }
    }

    /// Handle over the process's real standard output.
    pub fn stdout() -> Self {
        Self::new(shared(StreamWriter::stdout()))
    }

    /// The process-wide handle, created over stdout on first use.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// The writer output is currently routed to.
    pub fn current(&self) -> SharedWriter {
        Arc::clone(&lock_recovering(&self.current))
    }

    /// Install `writer` and return the one it replaces.
    pub fn replace(&self, writer: SharedWriter) -> SharedWriter {
        std::mem::replace(&mut *lock_recovering(&self.current), writer)
    }

    pub fn write_str(&self, chunk: &str) -> Result<(), ConsoleError> {
        // Clone out of the slot first so a writer that prints back through
        // this handle cannot block on the slot lock.
        let writer = self.current();
        let mut guard = lock_recovering(&writer);
        guard.write_str(chunk)
    }

    pub fn write_fmt(&self, args: fmt::Arguments<'_>) -> Result<(), ConsoleError> {
        match args.as_str() {
            Some(s) => self.write_str(s),
            None => self.write_str(&fmt::format(args)),
        }
    }

    pub fn write_line(&self) -> Result<(), ConsoleError> {
        let writer = self.current();
        let mut guard = lock_recovering(&writer);
        guard.write_line()
    }

    /// Write `text` followed by the line terminator as one operation.
    pub fn println(&self, text: &str) -> Result<(), ConsoleError> {
        let writer = self.current();
        let mut guard = lock_recovering(&writer);
        guard.write_str(text)?;
        guard.write_line()
    }

    pub fn flush(&self) -> Result<(), ConsoleError> {
        let writer = self.current();
        let mut guard = lock_recovering(&writer);
        guard.flush()
    }

    /// Byte-oriented adapter for code that wants an [`io::Write`].
    pub fn stream(self: &Arc<Self>) -> ConsoleStream {
        ConsoleStream {
            console: Arc::clone(self),
            carry: Vec::new(),
        }
    }

    /// Whether a redirector currently owns this handle.
    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::SeqCst)
    }

    /// Claim the handle for a capture. Returns `false` if already claimed.
    pub(crate) fn try_begin_capture(&self) -> bool {
        self.captured
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn end_capture(&self) {
        self.captured.store(false, Ordering::SeqCst);
    }
}

impl fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleOutput")
            .field("captured", &self.is_captured())
            .finish_non_exhaustive()
    }
}

/// [`io::Write`] view of a [`ConsoleOutput`].
///
/// Bytes are decoded as UTF-8; a multi-byte character split across two
/// writes is held back until it is complete. Invalid sequences are replaced
/// with U+FFFD, and an incomplete sequence still held at flush or drop is
/// written as U+FFFD rather than lost.
pub struct ConsoleStream {
    console: Arc<ConsoleOutput>,
    carry: Vec<u8>,
}

impl ConsoleStream {
    /// Decode the carried bytes up to the last complete character.
    ///
    /// An incomplete trailing sequence stays in `carry` for the next write.
    fn take_decodable(&mut self) -> String {
        let mut text = String::new();
        let mut consumed = 0;
        loop {
            match std::str::from_utf8(&self.carry[consumed..]) {
                Ok(valid) => {
                    text.push_str(valid);
                    consumed = self.carry.len();
                    break;
                }
                Err(e) => {
                    let valid_up_to = consumed + e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.carry[consumed..valid_up_to]));
                    match e.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            consumed = valid_up_to + len;
                        }
                        None => {
                            consumed = valid_up_to;
                            break;
                        }
                    }
                }
            }
        }
        self.carry.drain(..consumed);
        text
    }

    /// Write out whatever is still carried, replacing it with U+FFFD.
    fn drain_carry(&mut self) -> Result<(), ConsoleError> {
        if self.carry.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.carry).into_owned();
        self.carry.clear();
        self.console.write_str(&text)
    }
}

impl io::Write for ConsoleStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.carry.extend_from_slice(buf);
        let text = self.take_decodable();
        if !text.is_empty() {
            self.console.write_str(&text)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_carry()?;
        self.console.flush()?;
        Ok(())
    }
}

impl Drop for ConsoleStream {
    fn drop(&mut self) {
        let _ = self.drain_carry();
    }
}
