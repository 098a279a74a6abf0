//! In-memory facade: keeps every record so tests (and embedders) can assert on
//! exactly what reached the facade.

use super::{Facade, Record};
use crate::level::Level;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// An owned copy of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub channel: String,
    pub level: Level,
    pub message: String,
    /// The error chain when the record carried an error.
    pub error: Option<Vec<String>>,
}

#[derive(Debug)]
struct Filter {
    min_level: Level,
    channels: HashMap<String, Level>,
}

#[derive(Debug)]
struct State {
    filter: Mutex<Filter>,
    records: Mutex<Vec<CapturedRecord>>,
    gate_checks: AtomicUsize,
}

/// Cloning shares the same record buffer and level filter.
#[derive(Debug, Clone)]
pub struct Capture {
    state: Arc<State>,
}

impl Default for Capture {
    fn default() -> Self {
        Self::new(Level::Trace)
    }
}

impl Capture {
    /// Records everything at or above `min_level`.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        Self {
            state: Arc::new(State {
                filter: Mutex::new(Filter {
                    min_level,
                    channels: HashMap::new(),
                }),
                records: Mutex::new(Vec::new()),
                gate_checks: AtomicUsize::new(0),
            }),
        }
    }

    /// Changes the threshold for channels without their own level.
    pub fn set_level(&self, level: Level) {
        self.filter().min_level = level;
    }

    /// Exact-name override for one channel.
    pub fn set_channel_level(&self, channel: impl Into<String>, level: Level) {
        self.filter().channels.insert(channel.into(), level);
    }

    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock_records().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock_records().iter().map(|r| r.message.clone()).collect()
    }

    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.lock_records().iter().filter(|r| r.level == level).count()
    }

    #[must_use]
    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.lock_records()
            .iter()
            .any(|r| r.level == level && r.message == message)
    }

    /// How many times `enabled` has been queried.
    #[must_use]
    pub fn gate_checks(&self) -> usize {
        self.state.gate_checks.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.lock_records().clear();
    }

    fn filter(&self) -> std::sync::MutexGuard<'_, Filter> {
        self.state.filter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, Vec<CapturedRecord>> {
        self.state
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Facade for Capture {
    fn enabled(&self, channel: &str, level: Level) -> bool {
        self.state.gate_checks.fetch_add(1, Ordering::Relaxed);
        let filter = self.filter();
        let threshold = filter
            .channels
            .get(channel)
            .copied()
            .unwrap_or(filter.min_level);
        level >= threshold
    }

    fn emit(&self, record: &Record<'_>) {
        let captured = CapturedRecord {
            channel: record.channel.to_string(),
            level: record.level,
            message: record.message.to_string(),
            error: record.error.map(super::error_chain),
        };
        self.lock_records().push(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_min_level_and_channel_override() {
        let capture = Capture::new(Level::Warn);
        capture.set_channel_level("noisy", Level::Trace);

        assert!(!capture.enabled("app", Level::Info));
        assert!(capture.enabled("app", Level::Error));
        assert!(capture.enabled("noisy", Level::Trace));
        assert_eq!(capture.gate_checks(), 3);
    }

    #[test]
    fn emit_keeps_error_chain() {
        let capture = Capture::default();
        let err = std::io::Error::other("boom");
        capture.emit(&Record::new("c", Level::Error, "failed").with_error(&err));

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error, Some(vec!["boom".to_string()]));
    }
}
