//! `loghandle` - named logger handles over a logging facade.
//!
//! A thin decorator that adds, on top of any level-gated facade:
//! - per-level accessors on named handles, with lazy message construction
//! - process-wide and handle-local error observers
//! - console channels (`cout`, `cwarn`, `cerr`) that always print and mirror to the facade
//! - scoped stopwatches with warn and error thresholds
//!
//! The facade can be the built-in [`Dispatcher`] (terminal, file and JSON-lines
//! outputs), the `log` crate via [`LogBridge`], or the in-memory [`Capture`].
//!
//! # Example
//!
//! ```
//! use loghandle::{Dispatcher, Level, Logs};
//! use std::time::Duration;
//!
//! let logs = Logs::new(
//!     Dispatcher::builder()
//!         .level(Level::Debug)
//!         .terminal()
//!             .colors(false)
//!             .done()
//!         .build(),
//! );
//!
//! let log = loghandle::me!(logs);
//! log.info().print("service starting");
//! log.debug().format(format_args!("{} workers", 4));
//!
//! let db = log.with_prefix("[db] ");
//! let sw = db.info().stopwatch("migrate").warn_over(Duration::from_secs(2));
//! sw.log().debug().print("applying 3 migrations");
//! drop(sw);
//!
//! let err = std::io::Error::other("connection refused");
//! db.error().throwable(&err);
//! ```
//!
//! # Features
//!
//! - `cli` (default): builds the `loghandle-demo` binary

pub mod caller;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod fmt;
pub mod handle;
pub mod internal;
pub mod level;
pub mod observer;
pub mod output;
pub mod sink;
pub mod stopwatch;

pub use config::Config;
pub use console::{ColorChoice, Console, ConsoleCapture, ConsoleStyle, Stream};
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use error::Error;
pub use facade::{Capture, CapturedRecord, Facade, LogBridge, Record};
pub use fmt::{Color, TagConfig};
pub use handle::{Log, Logs, SingleLevel};
pub use level::Level;
pub use observer::{ErrorObserver, ErrorObservers, ObserverRegistry, observer};
pub use output::{FileOutput, JsonOutput, Output, TerminalOutput};
pub use sink::Sink;
pub use stopwatch::Stopwatch;

/// A handle named after the current module, resolved at compile time.
///
/// ```
/// # let logs = loghandle::Logs::new(loghandle::Capture::default());
/// let log = loghandle::me!(logs);
/// assert_eq!(log.name(), module_path!());
/// ```
#[macro_export]
macro_rules! me {
    ($logs:expr) => {
        $logs.named(::core::module_path!())
    };
}
