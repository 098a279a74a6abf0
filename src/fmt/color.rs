//! 24-bit colors for console channels, level tags and inline markup.

use std::collections::HashMap;
use std::fmt;

/// A dedicated type documents color intent instead of passing raw `u8` triples around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Terminates any active SGR styling.
    pub const RESET: &'static str = "\x1b[0m";
    /// SGR bold.
    pub const BOLD: &'static str = "\x1b[1m";
    /// SGR dim.
    pub const DIM: &'static str = "\x1b[2m";

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the `#` is optional). `None` on anything else.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Markup tags name either a palette entry or a raw hex value.
    /// Unknown names fall back to white so a typo never breaks a log line.
    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn resolve(name: &str, palette: &HashMap<String, Self>) -> Self {
        if name.starts_with('#') {
            return Self::from_hex(name).unwrap_or_else(Self::white);
        }
        palette
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or_else(Self::white)
    }

    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    #[must_use]
    pub const fn green() -> Self {
        Self::new(80, 250, 123)
    }

    #[must_use]
    pub const fn yellow() -> Self {
        Self::new(241, 250, 140)
    }

    #[must_use]
    pub const fn bright_yellow() -> Self {
        Self::new(255, 255, 85)
    }

    #[must_use]
    pub const fn cyan() -> Self {
        Self::new(139, 233, 253)
    }

    #[must_use]
    pub const fn red() -> Self {
        Self::new(255, 85, 85)
    }

    #[must_use]
    pub const fn bright_red() -> Self {
        Self::new(255, 60, 60)
    }

    #[must_use]
    pub const fn purple() -> Self {
        Self::new(189, 147, 249)
    }

    #[must_use]
    pub const fn blue() -> Self {
        Self::new(98, 114, 164)
    }

    /// Names every markup tag understands without any `[colors]` config.
    #[must_use]
    pub fn default_palette() -> HashMap<String, Self> {
        [
            ("white", Self::white()),
            ("green", Self::green()),
            ("yellow", Self::yellow()),
            ("cyan", Self::cyan()),
            ("red", Self::red()),
            ("purple", Self::purple()),
            ("blue", Self::blue()),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color))
        .collect()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Wraps `text` in the color's foreground escape and a reset.
#[must_use]
pub fn colorize(text: &str, color: Color) -> String {
    format!("{}{text}{}", color.fg_ansi(), Color::RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_accepts_optional_hash() {
        assert_eq!(Color::from_hex("#ff0080"), Some(Color::new(255, 0, 128)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::new(0, 255, 0)));
    }

    #[test]
    fn from_hex_rejects_malformed() {
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn resolve_prefers_hex_then_palette_then_white() {
        let palette = Color::default_palette();
        assert_eq!(Color::resolve("#010203", &palette), Color::new(1, 2, 3));
        assert_eq!(Color::resolve("RED", &palette), Color::red());
        assert_eq!(Color::resolve("nope", &palette), Color::white());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::new(1, 2, 255).to_string(), "#0102ff");
    }
}
