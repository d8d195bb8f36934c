//! Port for receiving captured console lines.
//!
//! The redirector depends on this trait rather than on [`crate::LogSink`],
//! and holds it weakly so a sink is never kept alive by its own capture.

/// Destination for complete lines split out of console output.
///
/// Implementations must be thread-safe: lines arrive on whichever thread
/// wrote to the console.
pub trait LineSink: Send + Sync {
    /// Record one line (without its terminator).
    fn log(&self, message: &str);
}
