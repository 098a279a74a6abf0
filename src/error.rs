//! Errors surfaced by handle construction, configuration and outputs.
//!
//! Logging itself never fails from the caller's point of view: output errors
//! are reported through the internal logger and dropped. The variants here are
//! what `Logs::load`, `Logs::caller`, `Config::load_from` and `Facade::flush`
//! can hand back.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// A log file, config file or console stream could not be read or written.
    Io(std::io::Error),
    /// A config file is not valid TOML for the expected schema.
    ConfigParse(toml::de::Error),
    /// No home directory to derive the default config location from.
    ConfigDirNotFound,
    /// A `source = "..."` chain leads back to a file already being loaded.
    CyclicInclude(PathBuf),
    /// A level name that is none of trace, debug, info, warn or error.
    InvalidLevel(String),
    /// A color choice that is none of auto, always or never.
    InvalidColorChoice(String),
    /// A record could not be encoded for a structured output.
    Encode(String),
    /// Caller lookup with a negative number of frames.
    InvalidOffset(i32),
    /// Caller lookup ran off the end of the captured stack.
    CallerUnresolved(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "config parse error: {e}"),
            Self::ConfigDirNotFound => f.write_str("config directory not found"),
            Self::CyclicInclude(path) => write!(f, "cyclic include: {}", path.display()),
            Self::InvalidLevel(name) => write!(f, "invalid log level: {name}"),
            Self::InvalidColorChoice(name) => write!(f, "invalid color choice: {name}"),
            Self::Encode(reason) => write!(f, "encode error: {reason}"),
            Self::InvalidOffset(offset) => {
                write!(f, "invalid argument: caller offset must be >= 0, got {offset}")
            }
            Self::CallerUnresolved(offset) => {
                write!(f, "could not resolve caller {offset} frame(s) back")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}
