//! Scoped console capture.

use super::LogSink;

/// Keeps the console captured for as long as it lives.
///
/// Dropping the guard restores the original writer, including when the
/// owning scope unwinds. A guard taken while the sink was already capturing
/// does not stop that earlier capture.
#[must_use = "capture stops as soon as the guard is dropped"]
pub struct CaptureGuard<'a> {
    sink: &'a LogSink,
    /// Whether this guard started the capture it will stop.
    owns: bool,
}

impl<'a> CaptureGuard<'a> {
    pub(super) const fn new(sink: &'a LogSink, owns: bool) -> Self {
        Self { sink, owns }
    }

    pub const fn sink(&self) -> &LogSink {
        self.sink
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if self.owns {
            self.sink.stop_capture_console_output();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LogConfig;
    use crate::console::{ConsoleOutput, LINE_ENDING, MemoryWriter, shared};
    use crate::sink::LogSink;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn guard_restores_console_on_drop() {
        let temp = tempfile::tempdir().unwrap();
        let probe = MemoryWriter::new();
        let console = Arc::new(ConsoleOutput::new(shared(probe.clone())));
        let config = LogConfig::default()
            .with_directory(temp.path())
            .with_timestamps(false)
            .with_console(false);
        let sink = LogSink::with_console(config, Arc::clone(&console)).unwrap();

        {
            let guard = sink.capture_scope().unwrap();
            assert!(guard.sink().is_capturing());
            console.println("inside").unwrap();
        }
        console.println("outside").unwrap();

        assert!(!sink.is_capturing());
        assert_eq!(
            fs::read_to_string(sink.path()).unwrap(),
            format!("[Console] inside{LINE_ENDING}")
        );
        assert_eq!(
            probe.contents(),
            format!("inside{LINE_ENDING}outside{LINE_ENDING}")
        );
    }

    #[test]
    fn guard_restores_console_when_scope_panics() {
        let temp = tempfile::tempdir().unwrap();
        let probe = MemoryWriter::new();
        let console = Arc::new(ConsoleOutput::new(shared(probe)));
        let config = LogConfig::default()
            .with_directory(temp.path())
            .with_console(false);
        let sink = LogSink::with_console(config, Arc::clone(&console)).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = sink.capture_scope().unwrap();
            panic!("scope failed");
        }));

        assert!(result.is_err());
        assert!(!sink.is_capturing());
        assert!(!console.is_captured());
    }

    #[test]
    fn nested_scope_keeps_outer_capture() {
        let temp = tempfile::tempdir().unwrap();
        let console = Arc::new(ConsoleOutput::new(shared(MemoryWriter::new())));
        let config = LogConfig::default()
            .with_directory(temp.path())
            .with_timestamps(false)
            .with_console(false);
        let sink = LogSink::with_console(config, Arc::clone(&console)).unwrap();

        sink.capture_console_output().unwrap();
        {
            let _inner = sink.capture_scope().unwrap();
        }
        assert!(sink.is_capturing());
        console.println("still captured").unwrap();
        sink.stop_capture_console_output();

        assert_eq!(
            fs::read_to_string(sink.path()).unwrap(),
            format!("[Console] still captured{LINE_ENDING}")
        );
    }
}
