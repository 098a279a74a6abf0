//! Named logger handles and the factory that builds them.
//!
//! A [`Logs`] factory ties a facade, a console and the process-wide error observers
//! together. Every [`Log`] it hands out shares those three and adds its own channel
//! name, message prefix and handle-local observers.

mod single;

pub use single::SingleLevel;

use crate::caller;
use crate::config::Config;
use crate::console::Console;
use crate::dispatch::Dispatcher;
use crate::facade::{Facade, Record};
use crate::internal;
use crate::level::Level;
use crate::observer::{ErrorObserver, ErrorObservers};
use crate::sink::Sink;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Rewrites a message before it is emitted.
pub type Renderer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Builds [`Log`] handles over one facade.
///
/// Cloning is cheap and shares everything, including the process-wide observers.
#[derive(Clone)]
pub struct Logs {
    facade: Arc<dyn Facade>,
    console: Arc<Console>,
    observers: Arc<ErrorObservers>,
}

impl Logs {
    /// Handles over `facade`, with console channels on the process's stdio.
    #[must_use]
    pub fn new(facade: impl Facade + 'static) -> Self {
        Self::from_facade(Arc::new(facade))
    }

    #[must_use]
    pub fn from_facade(facade: Arc<dyn Facade>) -> Self {
        Self {
            facade,
            console: Arc::new(Console::stdio()),
            observers: Arc::new(ErrorObservers::new()),
        }
    }

    /// Replaces the console used by `cout`, `cwarn` and `cerr`.
    #[must_use]
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = Arc::new(console);
        self
    }

    /// A [`Dispatcher`] and a console built from `config`. Also initializes the
    /// diagnostic logger from the same config.
    #[must_use]
    pub fn from_config(config: &Config, app_name: &str) -> Self {
        internal::init_with_config(config);
        let console = Console::stdio_with(config.color_choice()).palette(config.palette());
        Self::new(Dispatcher::from_config(config, app_name)).with_console(console)
    }

    /// [`from_config`](Self::from_config) with the config at its default location.
    ///
    /// # Errors
    /// Config loading errors: unreadable file, bad TOML, cyclic includes.
    pub fn load(app_name: &str) -> Result<Self, crate::Error> {
        let config = Config::load()?;
        Ok(Self::from_config(&config, app_name))
    }

    #[must_use]
    pub const fn facade(&self) -> &Arc<dyn Facade> {
        &self.facade
    }

    #[must_use]
    pub const fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// A handle on channel `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Log {
        Log {
            name: Arc::from(name),
            facade: Arc::clone(&self.facade),
            console: Arc::clone(&self.console),
            renderer: None,
            observers: Arc::new(ErrorObservers::new()),
            global: Arc::clone(&self.observers),
        }
    }

    /// A handle named after `T`'s full type path.
    #[must_use]
    pub fn for_type<T: ?Sized>(&self) -> Log {
        self.named(std::any::type_name::<T>())
    }

    /// A handle named after the calling module or type.
    ///
    /// Resolved from the stack at runtime; without symbols the caller's source
    /// file is used instead. [`me!`](crate::me) resolves at compile time.
    #[must_use]
    #[track_caller]
    #[inline(never)]
    pub fn me(&self) -> Log {
        let location = Location::caller();
        match caller::stack_ancestor(1) {
            Ok(path) => self.named(&path),
            Err(e) => {
                internal::trace("CALLER", &format!("{e}, using {}", location.file()));
                self.named(location.file())
            }
        }
    }

    /// A handle named after the function `generations_back` frames above the caller.
    /// `0` is the caller itself.
    ///
    /// # Errors
    /// [`Error::InvalidOffset`](crate::Error::InvalidOffset) for negative offsets,
    /// [`Error::CallerUnresolved`](crate::Error::CallerUnresolved) when the frame
    /// cannot be read.
    #[inline(never)]
    pub fn caller(&self, generations_back: i32) -> Result<Log, crate::Error> {
        if generations_back < 0 {
            return Err(crate::Error::InvalidOffset(generations_back));
        }
        let offset = generations_back
            .checked_add(1)
            .ok_or(crate::Error::InvalidOffset(generations_back))?;
        caller::stack_ancestor(offset).map(|path| self.named(&path))
    }

    /// Registers `observer` for errors logged through any handle of this factory.
    pub fn add_observer(&self, observer: &ErrorObserver) -> &Self {
        self.observers.add(observer);
        self
    }

    pub fn remove_observer(&self, observer: &ErrorObserver) -> &Self {
        self.observers.remove(observer);
        self
    }

    #[must_use]
    pub fn observers(&self) -> &ErrorObservers {
        &self.observers
    }

    /// # Errors
    /// I/O errors from the facade's backends.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.facade.flush()
    }
}

impl fmt::Debug for Logs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logs")
            .field("console", &self.console)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

/// A named logger handle.
///
/// Clones share the handle-local observer registry; [`with_prefix`](Self::with_prefix)
/// starts a new one.
#[derive(Clone)]
pub struct Log {
    name: Arc<str>,
    facade: Arc<dyn Facade>,
    console: Arc<Console>,
    renderer: Option<Renderer>,
    observers: Arc<ErrorObservers>,
    global: Arc<ErrorObservers>,
}

impl Log {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A handle on the same channel that puts `prefix` in front of every message,
    /// outside any prefix this handle already adds.
    #[must_use]
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let previous = self.renderer.clone();
        let renderer: Renderer = Arc::new(move |msg: &str| match &previous {
            Some(previous) => format!("{prefix}{}", previous(msg)),
            None => format!("{prefix}{msg}"),
        });

        Self {
            name: Arc::clone(&self.name),
            facade: Arc::clone(&self.facade),
            console: Arc::clone(&self.console),
            renderer: Some(renderer),
            observers: Arc::new(ErrorObservers::new()),
            global: Arc::clone(&self.global),
        }
    }

    /// `msg` as this handle would emit it.
    #[must_use]
    pub fn render(&self, msg: &str) -> String {
        self.renderer
            .as_ref()
            .map_or_else(|| msg.to_string(), |render| render(msg))
    }

    /// Asks the facade; never cached.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.facade.enabled(&self.name, level)
    }

    #[must_use]
    pub const fn at(&self, sink: Sink) -> SingleLevel<'_> {
        SingleLevel::new(self, sink)
    }

    #[must_use]
    pub const fn trace(&self) -> SingleLevel<'_> {
        self.at(Sink::Trace)
    }

    #[must_use]
    pub const fn debug(&self) -> SingleLevel<'_> {
        self.at(Sink::Debug)
    }

    #[must_use]
    pub const fn info(&self) -> SingleLevel<'_> {
        self.at(Sink::Info)
    }

    #[must_use]
    pub const fn warn(&self) -> SingleLevel<'_> {
        self.at(Sink::Warn)
    }

    #[must_use]
    pub const fn error(&self) -> SingleLevel<'_> {
        self.at(Sink::Error)
    }

    /// stdout, uncolored, mirrored to info.
    #[must_use]
    pub const fn cout(&self) -> SingleLevel<'_> {
        self.at(Sink::Cout)
    }

    /// stderr, bold yellow, mirrored to warn.
    #[must_use]
    pub const fn cwarn(&self) -> SingleLevel<'_> {
        self.at(Sink::Cwarn)
    }

    /// stderr, bold red, mirrored to error.
    #[must_use]
    pub const fn cerr(&self) -> SingleLevel<'_> {
        self.at(Sink::Cerr)
    }

    /// Registers `observer` for errors logged through this handle (and its clones).
    pub fn add_observer(&self, observer: &ErrorObserver) -> &Self {
        self.observers.add(observer);
        self
    }

    pub fn remove_observer(&self, observer: &ErrorObserver) -> &Self {
        self.observers.remove(observer);
        self
    }

    #[must_use]
    pub fn observers(&self) -> &ErrorObservers {
        &self.observers
    }

    pub(crate) fn console(&self) -> &Console {
        &self.console
    }

    /// Hands a fully rendered message to the facade. The caller has checked the gate.
    pub(crate) fn emit(&self, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) {
        let record = Record {
            channel: &self.name,
            level,
            message,
            error,
        };
        self.facade.emit(&record);
    }

    /// Process-wide observers first, then this handle's.
    pub(crate) fn notify(&self, error: &(dyn Error + 'static)) {
        self.global.dispatch(error);
        self.observers.dispatch(error);
    }
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log")
            .field("name", &self.name)
            .field("prefixed", &self.renderer.is_some())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
