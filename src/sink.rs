//! The eight destinations a handle can write to: the five facade levels and
//! three console channels that mirror into the facade.

use crate::console::{ConsoleStyle, Stream};
use crate::fmt::Color;
use crate::level::Level;
use std::fmt;

/// One accessor of a [`Log`](crate::Log) handle.
///
/// Console sinks always print to their stream; their facade record is gated by
/// [`Sink::level`] independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Uncolored stdout, mirrored to info.
    Cout,
    /// Bold yellow stderr, mirrored to warn.
    Cwarn,
    /// Bold red stderr, mirrored to error.
    Cerr,
}

impl Sink {
    /// The facade level this sink emits (or mirrors) to.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Trace => Level::Trace,
            Self::Debug => Level::Debug,
            Self::Info | Self::Cout => Level::Info,
            Self::Warn | Self::Cwarn => Level::Warn,
            Self::Error | Self::Cerr => Level::Error,
        }
    }

    /// `None` for plain facade sinks.
    #[must_use]
    pub const fn stream(self) -> Option<Stream> {
        match self {
            Self::Cout => Some(Stream::Stdout),
            Self::Cwarn | Self::Cerr => Some(Stream::Stderr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_console(self) -> bool {
        self.stream().is_some()
    }

    /// Default decoration for console text that carries no markup of its own.
    #[must_use]
    pub const fn console_style(self) -> ConsoleStyle {
        match self {
            Self::Cwarn => ConsoleStyle::bold(Color::bright_yellow()),
            Self::Cerr => ConsoleStyle::bold(Color::bright_red()),
            _ => ConsoleStyle::plain(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Cout => "cout",
            Self::Cwarn => "cwarn",
            Self::Cerr => "cerr",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Cout,
            Self::Cwarn,
            Self::Cerr,
        ]
    }
}

impl From<Level> for Sink {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => Self::Trace,
            Level::Debug => Self::Debug,
            Level::Info => Self::Info,
            Level::Warn => Self::Warn,
            Level::Error => Self::Error,
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_sinks_mirror_their_levels() {
        assert_eq!(Sink::Cout.level(), Level::Info);
        assert_eq!(Sink::Cwarn.level(), Level::Warn);
        assert_eq!(Sink::Cerr.level(), Level::Error);
    }

    #[test]
    fn only_console_sinks_have_streams() {
        let consoles: Vec<Sink> = Sink::all().into_iter().filter(|s| s.is_console()).collect();
        assert_eq!(consoles, vec![Sink::Cout, Sink::Cwarn, Sink::Cerr]);
        assert_eq!(Sink::Cout.stream(), Some(Stream::Stdout));
        assert_eq!(Sink::Cerr.stream(), Some(Stream::Stderr));
    }

    #[test]
    fn level_sinks_round_trip() {
        for level in Level::all() {
            assert_eq!(Sink::from(level).level(), level);
        }
    }
}
