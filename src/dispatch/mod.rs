//! The built-in facade backend: a level filter per channel in front of a list of
//! outputs. Each enabled record is fanned out to every output in order.

mod builder;
mod from_config;

pub use builder::{DispatcherBuilder, FileBuilder, JsonBuilder, OutputBuilder, TerminalBuilder};

use crate::facade::{Facade, Record};
use crate::level::Level;
use crate::output::Output;
use std::collections::HashMap;

/// Immutable after build, so one dispatcher is shared by every handle without locks.
#[derive(Default)]
pub struct Dispatcher {
    min_level: Level,
    /// Keyed by channel name or `::`-separated channel prefix.
    channel_levels: HashMap<String, Level>,
    outputs: Vec<Box<dyn Output>>,
    app_name: Option<String>,
}

impl Dispatcher {
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Threshold for `channel`: the override with the longest matching prefix,
    /// else the minimum level.
    ///
    /// `app::net` matches the channels `app::net` and `app::net::conn` but not
    /// `app::network`.
    #[must_use]
    pub fn effective_level(&self, channel: &str) -> Level {
        self.channel_levels
            .iter()
            .filter(|(prefix, _)| covers(prefix, channel))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(self.min_level, |(_, level)| *level)
    }

    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

fn covers(prefix: &str, channel: &str) -> bool {
    channel
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

impl Facade for Dispatcher {
    fn enabled(&self, channel: &str, level: Level) -> bool {
        if self.channel_levels.is_empty() {
            return level >= self.min_level;
        }
        level >= self.effective_level(channel)
    }

    fn emit(&self, record: &Record<'_>) {
        // Outputs report their own failures; one failing output must not starve the rest.
        for output in &self.outputs {
            let _ = output.write(record);
        }
    }

    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("min_level", &self.min_level)
            .field("channel_levels", &self.channel_levels)
            .field("outputs", &self.outputs.len())
            .field("app_name", &self.app_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Output for Recorder {
        fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
            self.0
                .lock()
                .unwrap()
                .push(format!("{}|{}", record.channel, record.message));
            Ok(())
        }

        fn flush(&self) -> Result<(), crate::Error> {
            Ok(())
        }
    }

    struct Failing;

    impl Output for Failing {
        fn write(&self, _: &Record<'_>) -> Result<(), crate::Error> {
            Err(crate::Error::Encode("nope".to_string()))
        }

        fn flush(&self) -> Result<(), crate::Error> {
            Ok(())
        }
    }

    #[test]
    fn longest_prefix_wins() {
        let dispatcher = Dispatcher::builder()
            .level(Level::Warn)
            .channel_level("app", Level::Info)
            .channel_level("app::net", Level::Trace)
            .build();

        assert_eq!(dispatcher.effective_level("other"), Level::Warn);
        assert_eq!(dispatcher.effective_level("app"), Level::Info);
        assert_eq!(dispatcher.effective_level("app::db"), Level::Info);
        assert_eq!(dispatcher.effective_level("app::net::conn"), Level::Trace);
        assert_eq!(dispatcher.effective_level("application"), Level::Warn);
        assert_eq!(dispatcher.effective_level("app::network"), Level::Info);
    }

    #[test]
    fn enabled_follows_min_level_without_overrides() {
        let dispatcher = Dispatcher::builder().level(Level::Info).build();
        assert!(!dispatcher.enabled("x", Level::Debug));
        assert!(dispatcher.enabled("x", Level::Info));
        assert!(dispatcher.enabled("x", Level::Error));
    }

    #[test]
    fn failing_output_does_not_block_others() {
        let recorder = Recorder::default();
        let dispatcher = Dispatcher::builder()
            .output(Failing)
            .output(recorder.clone())
            .build();

        dispatcher.emit(&Record::new("chan", Level::Info, "hello"));

        assert_eq!(*recorder.0.lock().unwrap(), vec!["chan|hello"]);
        assert_eq!(dispatcher.output_count(), 2);
    }
}
