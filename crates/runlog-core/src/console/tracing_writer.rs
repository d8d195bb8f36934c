//! `tracing-subscriber` writer that prints through a [`ConsoleOutput`].
//!
//! A fmt layer built with this writer is captured like any other console
//! output, so library diagnostics land in the log while capture is active.

use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use super::output::{ConsoleOutput, ConsoleStream};

#[derive(Debug, Clone)]
pub struct ConsoleMakeWriter {
    console: Arc<ConsoleOutput>,
}

impl ConsoleMakeWriter {
    pub const fn new(console: Arc<ConsoleOutput>) -> Self {
        Self { console }
    }

    /// Writer over the process-wide console handle.
    pub fn global() -> Self {
        Self::new(ConsoleOutput::global())
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleStream;

    fn make_writer(&'a self) -> Self::Writer {
        self.console.stream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{MemoryWriter, shared};

    #[test]
    fn fmt_layer_output_reaches_console() {
        let probe = MemoryWriter::new();
        let console = Arc::new(ConsoleOutput::new(shared(probe.clone())));

        let subscriber = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter::new(console))
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("routed through console");
        });

        assert!(probe.contents().contains("routed through console"));
    }
}
