//! Line-buffering redirector installed over the console during capture.
//!
//! Every character is passed through to the original writer untouched.
//! A copy is accumulated until a line terminator arrives, then the finished
//! line is handed to a [`LineSink`] with a fixed prefix.

use std::sync::Weak;

use super::writer::{ConsoleWriter, SharedWriter, lock_recovering};
use crate::error::ConsoleError;
use crate::ports::LineSink;

/// Prefix applied to every captured console line.
pub const CONSOLE_PREFIX: &str = "[Console] ";

/// Splits console output into lines for a [`LineSink`] while mirroring
/// it to the writer it replaced.
///
/// After [`ConsoleWriter::close`] the redirector keeps passing text through
/// to the original writer but stops logging it. A writer cloned out of the
/// console just before capture stopped can still run after the close; its
/// output is shown, not lost.
pub struct LineBufferingRedirector {
    original: SharedWriter,
    closed: bool,
    sink: Weak<dyn LineSink>,
    prefix: String,
    /// Characters written since the last line boundary.
    pending: String,
    /// The last boundary was a `\r`; a following `\n` completes it.
    after_cr: bool,
}

impl LineBufferingRedirector {
    pub fn new(original: SharedWriter, sink: Weak<dyn LineSink>) -> Self {
        Self::with_prefix(original, sink, CONSOLE_PREFIX)
    }

    pub fn with_prefix(
        original: SharedWriter,
        sink: Weak<dyn LineSink>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            original,
            closed: false,
            sink,
            prefix: prefix.into(),
            pending: String::new(),
            after_cr: false,
        }
    }

    /// The partial line waiting for a terminator.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Split `chunk` at terminators, forwarding each finished line.
    fn scan(&mut self, chunk: &str) {
        for ch in chunk.chars() {
            match ch {
                '\n' if self.after_cr => self.after_cr = false,
                '\n' | '\r' => {
                    self.after_cr = ch == '\r';
                    self.emit_pending();
                }
                _ => {
                    self.after_cr = false;
                    self.pending.push(ch);
                }
            }
        }
    }

    fn emit_pending(&mut self) {
        let line = self.pending.trim_end_matches(['\r', '\n']);
        if !line.is_empty() {
            if let Some(sink) = self.sink.upgrade() {
                sink.log(&format!("{}{line}", self.prefix));
            }
        }
        self.pending.clear();
    }
}

impl ConsoleWriter for LineBufferingRedirector {
    fn write_str(&mut self, chunk: &str) -> Result<(), ConsoleError> {
        if chunk.is_empty() {
            return Ok(());
        }
        // The original lock is released before any line reaches the sink:
        // the sink echoes to this same writer.
        lock_recovering(&self.original).write_str(chunk)?;
        if !self.closed {
            self.scan(chunk);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        if !self.pending.is_empty() {
            self.emit_pending();
        }
        lock_recovering(&self.original).flush()
    }

    fn close(&mut self) -> Result<(), ConsoleError> {
        if self.closed {
            return Ok(());
        }
        let flushed = self.flush();
        self.closed = true;
        flushed
    }
}

impl std::fmt::Debug for LineBufferingRedirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBufferingRedirector")
            .field("prefix", &self.prefix)
            .field("pending", &self.pending)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{MemoryWriter, shared};
    use crate::test_utils::RecordingSink;
    use std::sync::Arc;

    fn redirector() -> (LineBufferingRedirector, MemoryWriter, Arc<RecordingSink>) {
        let console = MemoryWriter::new();
        let sink = Arc::new(RecordingSink::default());
        let weak: Weak<dyn LineSink> = Arc::downgrade(&sink) as Weak<dyn LineSink>;
        let redirector = LineBufferingRedirector::new(shared(console.clone()), weak);
        (redirector, console, sink)
    }

    #[test]
    fn multi_line_chunk_forwards_each_line() {
        let (mut r, console, sink) = redirector();

        r.write_str("A\nB").unwrap();

        assert_eq!(console.contents(), "A\nB");
        assert_eq!(sink.lines(), vec!["[Console] A"]);
        assert_eq!(r.pending(), "B");
    }

    #[test]
    fn partial_writes_accumulate_until_terminator() {
        let (mut r, console, sink) = redirector();

        r.write_str("hel").unwrap();
        r.write_str("lo wor").unwrap();
        assert!(sink.lines().is_empty());
        r.write_str("ld\n").unwrap();

        assert_eq!(sink.lines(), vec!["[Console] hello world"]);
        assert_eq!(console.contents(), "hello world\n");
        assert!(r.pending().is_empty());
    }

    #[test]
    fn all_terminator_styles_split_lines() {
        let (mut r, console, sink) = redirector();
        let input = "one\r\ntwo\nthree\rfour\n";

        r.write_str(input).unwrap();

        assert_eq!(
            sink.lines(),
            vec!["[Console] one", "[Console] two", "[Console] three", "[Console] four"]
        );
        assert_eq!(console.contents(), input);
    }

    #[test]
    fn crlf_split_across_writes_counts_once() {
        let (mut r, console, sink) = redirector();

        r.write_str("first\r").unwrap();
        r.write_str("\nsecond\n").unwrap();

        assert_eq!(sink.lines(), vec!["[Console] first", "[Console] second"]);
        assert_eq!(console.contents(), "first\r\nsecond\n");
    }

    #[test]
    fn empty_lines_are_not_forwarded() {
        let (mut r, console, sink) = redirector();

        r.write_str("\n\nx\n\r\n").unwrap();

        assert_eq!(sink.lines(), vec!["[Console] x"]);
        assert_eq!(console.contents(), "\n\nx\n\r\n");
    }

    #[test]
    fn single_characters_use_the_same_logic() {
        let (mut r, console, sink) = redirector();

        for ch in "ok\nnext".chars() {
            r.write_char(ch).unwrap();
        }

        assert_eq!(sink.lines(), vec!["[Console] ok"]);
        assert_eq!(r.pending(), "next");
        assert_eq!(console.contents(), "ok\nnext");
    }

    #[test]
    fn write_line_completes_pending_content() {
        let (mut r, _console, sink) = redirector();

        r.write_str("status: ready").unwrap();
        r.write_line().unwrap();

        assert_eq!(sink.lines(), vec!["[Console] status: ready"]);
    }

    #[test]
    fn flush_forwards_unterminated_remainder_once() {
        let (mut r, console, sink) = redirector();

        r.write_str("A\nB").unwrap();
        r.flush().unwrap();
        r.flush().unwrap();

        assert_eq!(sink.lines(), vec!["[Console] A", "[Console] B"]);
        assert_eq!(console.flush_count(), 2);
        assert!(r.pending().is_empty());
    }

    #[test]
    fn close_flushes_then_passes_writes_through_unlogged() {
        let (mut r, console, sink) = redirector();

        r.write_str("tail").unwrap();
        r.close().unwrap();
        assert!(r.is_closed());

        r.write_str("late\n").unwrap();
        r.flush().unwrap();
        assert!(r.close().is_ok());

        assert_eq!(sink.lines(), vec!["[Console] tail"]);
        assert_eq!(console.contents(), "taillate\n");
    }

    #[test]
    fn dropped_sink_leaves_pass_through_working() {
        let (mut r, console, sink) = redirector();
        drop(sink);

        r.write_str("still shown\n").unwrap();

        assert_eq!(console.contents(), "still shown\n");
    }

    #[test]
    fn custom_prefix_is_applied() {
        let console = MemoryWriter::new();
        let sink = Arc::new(RecordingSink::default());
        let weak: Weak<dyn LineSink> = Arc::downgrade(&sink) as Weak<dyn LineSink>;
        let mut r = LineBufferingRedirector::with_prefix(shared(console), weak, "[stdout] ");

        r.write_str("x\n").unwrap();

        assert_eq!(sink.lines(), vec!["[stdout] x"]);
    }
}
