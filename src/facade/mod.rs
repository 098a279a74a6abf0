//! The logging facade the handles decorate.
//!
//! A facade answers two questions per channel: is this level on, and where does a
//! record go. [`Dispatcher`](crate::Dispatcher) is the built-in backend,
//! [`LogBridge`] forwards to whatever the `log` crate has installed, and
//! [`Capture`] keeps records in memory.

mod bridge;
mod capture;

pub use bridge::LogBridge;
pub use capture::{Capture, CapturedRecord};

use crate::level::Level;
use std::error::Error;

/// One emission, borrowed from the caller for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Name of the logging channel (handle name).
    pub channel: &'a str,
    pub level: Level,
    /// Fully rendered text: prefixes applied, arguments substituted.
    pub message: &'a str,
    /// Set for error emissions.
    pub error: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Record<'a> {
    #[must_use]
    pub const fn new(channel: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            channel,
            level,
            message,
            error: None,
        }
    }

    #[must_use]
    pub const fn with_error(mut self, error: &'a (dyn Error + 'static)) -> Self {
        self.error = Some(error);
        self
    }

    /// The error's message followed by each `source()`. Empty without an error.
    #[must_use]
    pub fn error_chain(&self) -> Vec<String> {
        self.error.map(error_chain).unwrap_or_default()
    }
}

/// Walks `source()` from `err` down to the root cause.
#[must_use]
pub fn error_chain(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

/// Level-gated emission addressed by channel name.
///
/// `enabled` is queried before every emission and must be cheap. Implementations
/// are shared across threads.
pub trait Facade: Send + Sync {
    fn enabled(&self, channel: &str, level: Level) -> bool;

    /// Called only after `enabled` returned true for the record's channel and level.
    fn emit(&self, record: &Record<'_>);

    /// Buffered backends may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// I/O errors from the underlying backend.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
