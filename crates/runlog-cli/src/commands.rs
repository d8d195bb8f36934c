//! Subcommands of the `runlog` binary.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Append one entry per message
    Log {
        /// Messages to log
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Append an "ERROR: ..." entry
    Error {
        /// What went wrong
        message: String,
        /// Underlying cause, logged as the exception text
        #[arg(long)]
        cause: Option<String>,
    },

    /// Copy stdin to the console while capturing it into the log
    Tee,

    /// Print the resolved log file path
    Path,
}
