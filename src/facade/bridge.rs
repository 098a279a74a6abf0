//! Facade over the `log` crate, so handles can sit on top of any installed `log` backend.

use super::{Facade, Record, error_chain};
use crate::level::Level;

/// Routes records to `log::logger()` with the channel as the record target.
///
/// Enablement combines `log::max_level()` with the installed logger's own filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge;

impl Facade for LogBridge {
    fn enabled(&self, channel: &str, level: Level) -> bool {
        let level = log::Level::from(level);
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(channel)
                    .build(),
            )
    }

    fn emit(&self, record: &Record<'_>) {
        let level = log::Level::from(record.level);
        match record.error {
            None => log::logger().log(
                &log::Record::builder()
                    .args(format_args!("{}", record.message))
                    .level(level)
                    .target(record.channel)
                    .build(),
            ),
            Some(err) => log::logger().log(
                &log::Record::builder()
                    .args(format_args!(
                        "{}: {}",
                        record.message,
                        error_chain(err).join(": ")
                    ))
                    .level(level)
                    .target(record.channel)
                    .build(),
            ),
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        log::logger().flush();
        Ok(())
    }
}
