//! Console output handle, writers, and the capture redirector.
//!
//! Rust's `println!` writes straight to file descriptor 1, so capture works
//! on an explicit handle instead: output printed through [`ConsoleOutput`]
//! (or the [`console_print!`](crate::console_print) macros, or a tracing fmt
//! layer using [`ConsoleMakeWriter`]) follows whatever writer is installed.

mod output;
mod redirector;
mod tracing_writer;
mod writer;

pub use output::{ConsoleOutput, ConsoleStream};
pub use redirector::{CONSOLE_PREFIX, LineBufferingRedirector};
pub use tracing_writer::ConsoleMakeWriter;
pub use writer::{ConsoleWriter, LINE_ENDING, MemoryWriter, SharedWriter, StreamWriter, shared};

pub(crate) use writer::lock_recovering;

/// Print to the process-wide console handle.
///
/// Errors are discarded, as with `print!` on a closed pipe.
#[macro_export]
macro_rules! console_print {
    ($($arg:tt)*) => {{
        let _ = $crate::console::ConsoleOutput::global().write_fmt(format_args!($($arg)*));
    }};
}

/// Print a line to the process-wide console handle.
#[macro_export]
macro_rules! console_println {
    () => {{
        let _ = $crate::console::ConsoleOutput::global().write_line();
    }};
    ($($arg:tt)*) => {{
        let _ = $crate::console::ConsoleOutput::global().println(&format!($($arg)*));
    }};
}
