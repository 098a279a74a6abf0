//! Backends of the built-in [`Dispatcher`](crate::Dispatcher). The `Output` trait lets
//! callers add their own next to the terminal, file and JSON-lines outputs.

pub(crate) mod defaults;
mod file;
mod json;
mod terminal;

pub use file::FileOutput;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::facade::Record;

/// `Send + Sync` so one dispatcher can be shared by every thread that logs.
pub trait Output: Send + Sync {
    /// Renders and writes one record.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}

/// Appends the error chain of `record` as indented continuation lines.
pub(crate) fn push_error_lines(line: &mut String, record: &Record<'_>) {
    for (depth, cause) in record.error_chain().iter().enumerate() {
        line.push_str(if depth == 0 { "\n  error: " } else { "\n  caused by: " });
        line.push_str(cause);
    }
}
