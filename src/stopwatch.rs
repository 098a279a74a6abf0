//! Scoped duration logging.
//!
//! ```
//! use loghandle::{Capture, Logs};
//! use std::time::Duration;
//!
//! let capture = Capture::default();
//! let logs = Logs::new(capture.clone());
//! let log = logs.named("jobs");
//!
//! {
//!     let sw = log.info().stopwatch("rebuild").warn_over(Duration::from_secs(5));
//!     sw.log().debug().print("halfway");
//! } // "rebuild finished in N ms"
//!
//! assert_eq!(capture.messages()[0], "rebuild: started");
//! assert_eq!(capture.messages()[1], "rebuild: halfway");
//! ```

use crate::handle::Log;
use crate::sink::Sink;
use std::time::{Duration, Instant};

const DEFAULT_NAME: &str = "Stopwatch";

/// Measures the time from its creation to [`finish`](Self::finish) or drop,
/// whichever comes first, and reports it exactly once.
///
/// On finish the elapsed time goes to the sink the stopwatch was started from.
/// If it reaches the error threshold an error is logged and the warn threshold is
/// not checked; otherwise reaching the warn threshold logs a warning.
#[must_use = "a stopwatch reports when dropped; binding it to `_` drops it immediately"]
pub struct Stopwatch {
    name: String,
    /// Same channel as the reporter, messages prefixed with `"<name>: "`.
    log: Log,
    reporter: Log,
    report_to: Sink,
    started: Instant,
    warn_over: Option<Duration>,
    error_over: Option<Duration>,
    finished: bool,
}

impl Stopwatch {
    pub(crate) fn start(reporter: &Log, report_to: Sink, name: Option<&str>) -> Self {
        let name = name.unwrap_or(DEFAULT_NAME).to_string();
        reporter
            .at(report_to)
            .format(format_args!("{name}: started"));

        Self {
            log: reporter.with_prefix(format!("{name}: ")),
            name,
            reporter: reporter.clone(),
            report_to,
            started: Instant::now(),
            warn_over: None,
            error_over: None,
            finished: false,
        }
    }

    /// Logs a warning on finish if the elapsed time reaches `threshold`.
    pub fn warn_over(mut self, threshold: Duration) -> Self {
        self.warn_over = Some(threshold);
        self
    }

    /// Logs an error on finish if the elapsed time reaches `threshold`.
    pub fn error_over(mut self, threshold: Duration) -> Self {
        self.error_over = Some(threshold);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handle for logging inside the timed scope.
    #[must_use]
    pub const fn log(&self) -> &Log {
        &self.log
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stops the clock and reports. Returns the measured time.
    pub fn finish(mut self) -> Duration {
        let elapsed = self.elapsed();
        self.finished = true;
        self.report(elapsed);
        elapsed
    }

    fn report(&self, elapsed: Duration) {
        self.reporter.at(self.report_to).format(format_args!(
            "{} finished in {} ms",
            self.name,
            elapsed.as_millis()
        ));

        if !self.escalate("error", elapsed, self.error_over, Sink::Error) {
            self.escalate("warning", elapsed, self.warn_over, Sink::Warn);
        }
    }

    fn escalate(
        &self,
        kind: &str,
        elapsed: Duration,
        threshold: Option<Duration>,
        sink: Sink,
    ) -> bool {
        match threshold {
            Some(threshold) if elapsed >= threshold => {
                self.log.at(sink).format(format_args!(
                    "{kind} threshold was {} ms, elapsed time was {} ms, exceeded by {} ms",
                    threshold.as_millis(),
                    elapsed.as_millis(),
                    (elapsed - threshold).as_millis()
                ));
                true
            }
            _ => false,
        }
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            self.report(self.elapsed());
        }
    }
}

impl std::fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stopwatch")
            .field("name", &self.name)
            .field("report_to", &self.report_to)
            .field("elapsed", &self.elapsed())
            .field("warn_over", &self.warn_over)
            .field("error_over", &self.error_over)
            .finish_non_exhaustive()
    }
}
