//! The crate's own diagnostic logger, so config problems, failing outputs and
//! panicking observers are reported through the same formatting pipeline.
//!
//! Uses `OnceLock` so the configured logger is initialized exactly once, even if
//! several entry points race to call `init`. Until then a logger built from the
//! default config stands in, so handles created with `Logs::new` still get their
//! diagnostics. It only ever writes to the terminal: a file output that fails
//! must not report its failure back into itself.

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::facade::{Facade, Record};
use crate::level::Level;
use std::sync::OnceLock;

static INTERNAL_LOGGER: OnceLock<Dispatcher> = OnceLock::new();
static FALLBACK_LOGGER: OnceLock<Dispatcher> = OnceLock::new();

/// Loads the default config and initializes from it. Later calls are no-ops.
pub fn init() {
    if INTERNAL_LOGGER.get().is_some() {
        return;
    }
    let config = Config::load().unwrap_or_default();
    init_with_config(&config);
}

/// Reuses an already-loaded config to avoid reading it twice.
pub fn init_with_config(config: &Config) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| build_internal_logger(config));
    if !was_init {
        debug("INTERNAL", &format!("Log level: {}", config.general.level));
        if config.file.enabled {
            debug("INTERNAL", &format!("File: base_dir={}", config.file.base_dir));
        }
        if config.json.enabled {
            debug("INTERNAL", &format!("JSON: path={}", config.json.path));
        }
        debug("INTERNAL", "Internal logger ready");
    }
}

// Must not log: it runs inside `OnceLock` initialization.
fn build_internal_logger(config: &Config) -> Dispatcher {
    Dispatcher::builder()
        .level(config.general.level.parse().unwrap_or_default())
        .terminal()
        .colors(config.terminal.colors)
        .structure(&config.terminal.structure)
        .tag_config(config.tag_config())
        .done()
        .build()
}

fn logger() -> &'static Dispatcher {
    INTERNAL_LOGGER.get().unwrap_or_else(|| {
        FALLBACK_LOGGER.get_or_init(|| build_internal_logger(&Config::default()))
    })
}

fn log(level: Level, scope: &str, msg: &str) {
    let logger = logger();
    if logger.enabled(scope, level) {
        #[cfg(test)]
        reports::record(level, scope, msg);
        logger.emit(&Record::new(scope, level, msg));
    }
}

/// Whether a diagnostic at `level` containing `needle` has been emitted by this
/// test process.
#[cfg(test)]
pub(crate) fn reported(level: Level, needle: &str) -> bool {
    reports::contains(level, needle)
}


pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

/// Startup and teardown diagnostics.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies: missing include, bad palette entry, panicking observer.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Failed I/O in an output or on a console stream.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
