//! Formatting of log entries.

use std::error::Error;
use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone};

/// `chrono` format of the entry timestamp: `2024-05-01 13:45:09`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `message` as a log entry, stamped with the local time if requested.
pub fn format_entry(message: &str, include_timestamp: bool) -> String {
    format_entry_at(message, include_timestamp.then(Local::now))
}

/// Format `message` as `[timestamp] message`, or just `message` without one.
pub fn format_entry_at<Tz>(message: &str, timestamp: Option<DateTime<Tz>>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match timestamp {
        Some(ts) => format!("[{}] {message}", ts.format(TIMESTAMP_FORMAT)),
        None => message.to_string(),
    }
}

/// Build the message for an error entry.
///
/// `ERROR: {message}`, plus ` - Exception: {cause}` and one
/// `Caused by:` line per error in the cause's source chain.
pub fn format_error(message: &str, cause: Option<&(dyn Error + 'static)>) -> String {
    let mut text = format!("ERROR: {message}");
    let Some(cause) = cause else {
        return text;
    };

    let _ = write!(text, " - Exception: {cause}");
    let mut source = cause.source();
    while let Some(err) = source {
        let _ = write!(text, "\n    Caused by: {err}");
        source = err.source();
    }
    text
}
