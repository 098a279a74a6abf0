//! One level (or console channel) of a [`Log`] handle.

use super::Log;
use crate::fmt::plain_text;
use crate::sink::Sink;
use crate::stopwatch::Stopwatch;
use std::error::Error;
use std::fmt;

/// Accessor for one [`Sink`] of a handle, returned by [`Log::info`], [`Log::cerr`]
/// and friends.
///
/// Facade sinks check the facade before doing any work. Console sinks always write
/// the message to their stream as given, and mirror a plain-text copy through the
/// handle's prefix to the facade when its level is on.
#[derive(Clone, Copy)]
pub struct SingleLevel<'a> {
    log: &'a Log,
    sink: Sink,
}

impl<'a> SingleLevel<'a> {
    pub(crate) const fn new(log: &'a Log, sink: Sink) -> Self {
        Self { log, sink }
    }

    #[must_use]
    pub const fn sink(&self) -> Sink {
        self.sink
    }

    #[must_use]
    pub const fn log(&self) -> &'a Log {
        self.log
    }

    /// Always true for console sinks.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_console() || self.mirrored()
    }

    fn mirrored(&self) -> bool {
        self.log.is_enabled(self.sink.level())
    }

    pub fn print(&self, message: &str) -> &Self {
        let level = self.sink.level();
        match self.sink.stream() {
            None => {
                if self.mirrored() {
                    self.log.emit(level, &self.log.render(message), None);
                }
            }
            Some(stream) => {
                self.log
                    .console()
                    .write_line(stream, self.sink.console_style(), message);
                if self.mirrored() {
                    self.log.emit(level, &self.log.render(&plain_text(message)), None);
                }
            }
        }
        self
    }

    /// `message` runs only when the sink is enabled.
    pub fn print_with<F>(&self, message: F) -> &Self
    where
        F: FnOnce() -> String,
    {
        if self.is_enabled() {
            self.print(&message());
        }
        self
    }

    /// Prints each message as its own record. The iterator is not consumed when the
    /// sink is disabled.
    pub fn print_all<I, S>(&self, messages: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_enabled() {
            for message in messages {
                self.print(message.as_ref());
            }
        }
        self
    }

    /// Formats only when the sink is enabled:
    /// `log.debug().format(format_args!("{} rows", rows.len()))`.
    pub fn format(&self, args: fmt::Arguments<'_>) -> &Self {
        if self.is_enabled() {
            match args.as_str() {
                Some(literal) => self.print(literal),
                None => self.print(&args.to_string()),
            };
        }
        self
    }

    /// Logs `error` with `"<error type>: <error>"` as the message.
    pub fn throwable<E>(&self, error: &E) -> &Self
    where
        E: Error + 'static,
    {
        self.throwable_with(error, || default_message(error))
    }

    /// Logs `error` with a formatted message.
    pub fn throwable_fmt(&self, error: &(dyn Error + 'static), args: fmt::Arguments<'_>) -> &Self {
        self.throwable_with(error, || args.to_string())
    }

    /// Logs `error` with the message from `message`, evaluated only when enabled.
    ///
    /// The record carries the error, and the process-wide observers then the
    /// handle's observers are notified, all only when the facade level is on.
    ///
    /// Console sinks first [`print`](Self::print) the message, which writes the
    /// line and mirrors it, then emit a second record carrying the error.
    pub fn throwable_with<F>(&self, error: &(dyn Error + 'static), message: F) -> &Self
    where
        F: FnOnce() -> String,
    {
        let level = self.sink.level();

        if self.sink.is_console() {
            let message = message();
            self.print(&message);
            if self.mirrored() {
                self.log
                    .emit(level, &self.log.render(&plain_text(&message)), Some(error));
                self.log.notify(error);
            }
        } else if self.mirrored() {
            self.log.emit(level, &self.log.render(&message()), Some(error));
            self.log.notify(error);
        }
        self
    }

    /// Starts a stopwatch reporting to this sink. `None` names it `"Stopwatch"`.
    ///
    /// Its start and finish lines go here; threshold escalations go to the warn
    /// and error levels of the same handle.
    pub fn stopwatch<'n>(&self, name: impl Into<Option<&'n str>>) -> Stopwatch {
        Stopwatch::start(self.log, self.sink, name.into())
    }
}

impl fmt::Debug for SingleLevel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleLevel")
            .field("log", &self.log.name())
            .field("sink", &self.sink)
            .finish()
    }
}

fn default_message<E: Error>(error: &E) -> String {
    format!("{}: {error}", std::any::type_name::<E>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::facade::Capture;
    use crate::level::Level;
    use crate::Logs;

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("it broke")
        }
    }

    impl Error for Boom {}

    #[test]
    fn default_message_names_the_error_type() {
        assert!(default_message(&Boom).ends_with("single::tests::Boom: it broke"));
    }

    #[test]
    fn literal_arguments_are_not_reallocated() {
        let capture = Capture::default();
        let (console, _) = Console::capture();
        let logs = Logs::new(capture.clone()).with_console(console);

        logs.named("x").info().format(format_args!("plain"));
        assert!(capture.contains(Level::Info, "plain"));
    }

    #[test]
    fn disabled_format_is_never_rendered() {
        struct Loud;
        impl fmt::Display for Loud {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("rendered while disabled")
            }
        }

        let capture = Capture::new(Level::Warn);
        let (console, _) = Console::capture();
        let logs = Logs::new(capture.clone()).with_console(console);

        logs.named("x").debug().format(format_args!("{}", Loud));
        assert!(capture.records().is_empty());
    }
}
