//! Console streams behind the `cout`, `cwarn` and `cerr` channels.
//!
//! A [`Console`] writes whole lines to stdout or stderr. Text carrying inline markup
//! is rendered through the markup palette; other text gets the channel's default
//! style. On a stream without color support both are reduced to plain text.

use crate::fmt::{Color, style};
use crate::internal;
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Whether console channels emit ANSI escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Colors when the stream is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn resolve(self, stream: Stream) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                let tty = match stream {
                    Stream::Stdout => io::stdout().is_terminal(),
                    Stream::Stderr => io::stderr().is_terminal(),
                };
                tty && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

impl FromStr for ColorChoice {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "true" => Ok(Self::Always),
            "never" | "off" | "false" => Ok(Self::Never),
            _ => Err(crate::Error::InvalidColorChoice(s.to_string())),
        }
    }
}

/// Default decoration of a console channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    color: Option<Color>,
    bold: bool,
}

impl ConsoleStyle {
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            color: None,
            bold: false,
        }
    }

    #[must_use]
    pub const fn bold(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: true,
        }
    }

    #[must_use]
    pub const fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
        }
    }

    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.color.is_none() && !self.bold
    }

    /// Wraps `text` in this style's escapes.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + 32);
        if self.bold {
            out.push_str(Color::BOLD);
        }
        if let Some(color) = self.color {
            out.push_str(&color.fg_ansi());
        }
        out.push_str(text);
        out.push_str(Color::RESET);
        out
    }
}

type Writer = Mutex<Box<dyn Write + Send>>;

/// Line-oriented writer pair shared by every handle of a [`Logs`](crate::Logs) factory.
pub struct Console {
    stdout: Writer,
    stderr: Writer,
    stdout_colors: bool,
    stderr_colors: bool,
    palette: HashMap<String, Color>,
}

impl Console {
    /// The process's stdout and stderr with automatic color detection.
    #[must_use]
    pub fn stdio() -> Self {
        Self::stdio_with(ColorChoice::Auto)
    }

    #[must_use]
    pub fn stdio_with(choice: ColorChoice) -> Self {
        Self {
            stdout: Mutex::new(Box::new(io::stdout())),
            stderr: Mutex::new(Box::new(io::stderr())),
            stdout_colors: choice.resolve(Stream::Stdout),
            stderr_colors: choice.resolve(Stream::Stderr),
            palette: Color::default_palette(),
        }
    }

    /// Arbitrary writers, colors on or off for both.
    #[must_use]
    pub fn new(
        stdout: impl Write + Send + 'static,
        stderr: impl Write + Send + 'static,
        colors: bool,
    ) -> Self {
        Self {
            stdout: Mutex::new(Box::new(stdout)),
            stderr: Mutex::new(Box::new(stderr)),
            stdout_colors: colors,
            stderr_colors: colors,
            palette: Color::default_palette(),
        }
    }

    /// A colorless console writing into memory, and the reader for what it wrote.
    #[must_use]
    pub fn capture() -> (Self, ConsoleCapture) {
        let capture = ConsoleCapture::default();
        let console = Self::new(capture.stdout.clone(), capture.stderr.clone(), false);
        (console, capture)
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.stdout_colors = enabled;
        self.stderr_colors = enabled;
        self
    }

    /// Replaces the markup palette.
    #[must_use]
    pub fn palette(mut self, palette: HashMap<String, Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub const fn colors_enabled(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_colors,
            Stream::Stderr => self.stderr_colors,
        }
    }

    /// The exact text [`write_line`](Self::write_line) would print, without the newline.
    #[must_use]
    pub fn render(&self, stream: Stream, style: ConsoleStyle, text: &str) -> String {
        let colors = self.colors_enabled(stream);
        if style::has_markup(text) {
            let segments = style::parse(text);
            if colors {
                style::render(&segments, &self.palette)
            } else {
                style::render_plain(&segments)
            }
        } else if colors {
            style.apply(text)
        } else {
            text.to_string()
        }
    }

    /// Renders and writes `text` plus a newline, then flushes the stream.
    /// Write failures go to the diagnostic logger; the caller is never interrupted.
    pub fn write_line(&self, stream: Stream, style: ConsoleStyle, text: &str) {
        let line = self.render(stream, style, text);
        let mut writer = self.writer(stream);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            internal::error("CONSOLE", &format!("write to {stream:?} failed: {e}"));
        }
    }

    fn writer(&self, stream: Stream) -> MutexGuard<'_, Box<dyn Write + Send>> {
        let writer = match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        };
        writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("stdout_colors", &self.stdout_colors)
            .field("stderr_colors", &self.stderr_colors)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads back what a [`Console::capture`] console wrote.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    stdout: SharedBuf,
    stderr: SharedBuf,
}

impl ConsoleCapture {
    #[must_use]
    pub fn stdout(&self) -> String {
        self.stdout.contents()
    }

    #[must_use]
    pub fn stderr(&self) -> String {
        self.stderr.contents()
    }

    #[must_use]
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    #[must_use]
    pub fn stderr_lines(&self) -> Vec<String> {
        self.stderr().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.stdout.clear();
        self.stderr.clear();
    }
}
