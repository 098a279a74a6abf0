//! Level tags (`[INFO]`, `<warn>`, `ERROR:`) for the terminal and file outputs.

use crate::level::Level;
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

/// Casing applied to tag labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl Transform {
    #[must_use]
    pub fn apply(self, s: &str) -> Cow<'_, str> {
        match self {
            Self::None => Cow::Borrowed(s),
            Self::Uppercase => Cow::Owned(s.to_uppercase()),
            Self::Lowercase => Cow::Owned(s.to_lowercase()),
            Self::Capitalize => {
                let mut chars = s.chars();
                let Some(first) = chars.next() else {
                    return Cow::Borrowed(s);
                };
                let mut out: String = first.to_uppercase().collect();
                out.push_str(&chars.as_str().to_lowercase());
                Cow::Owned(out)
            }
        }
    }
}

impl FromStr for Transform {
    type Err = std::convert::Infallible;

    /// Unknown names mean "leave casing alone".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "uppercase" | "upper" => Self::Uppercase,
            "lowercase" | "lower" => Self::Lowercase,
            "capitalize" | "cap" => Self::Capitalize,
            _ => Self::None,
        })
    }
}

/// Where padding goes when a label is shorter than its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    Right,
    #[default]
    Center,
}

impl FromStr for Alignment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Center,
        })
    }
}

/// Pads `s` with spaces to `width` characters. Longer strings are returned
/// unchanged; odd center padding puts the extra space on the right.
#[must_use]
pub fn pad(s: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{s:<width$}"),
        Alignment::Right => format!("{s:>width$}"),
        Alignment::Center => format!("{s:^width$}"),
    }
}

/// Delimiters, casing, width and label overrides for level tags.
#[derive(Debug, Clone)]
pub struct TagConfig {
    pub prefix: String,
    pub suffix: String,
    pub transform: Transform,
    /// Keeps `[INFO ]` and `[ERROR]` the same width.
    pub min_width: usize,
    pub alignment: Alignment,
    /// Replaces the level name, e.g. `Error -> "FAIL"`.
    pub labels: HashMap<Level, String>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            prefix: "[".to_string(),
            suffix: "]".to_string(),
            transform: Transform::Uppercase,
            min_width: 5,
            alignment: Alignment::Center,
            labels: HashMap::new(),
        }
    }
}

impl TagConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub const fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub const fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn label(mut self, level: Level, label: impl Into<String>) -> Self {
        self.labels.insert(level, label.into());
        self
    }

    /// Label lookup, then casing, then padding, then delimiters.
    #[must_use]
    pub fn format(&self, level: Level) -> String {
        let label = self
            .labels
            .get(&level)
            .map_or_else(|| level.as_str(), String::as_str);
        let padded = pad(&self.transform.apply(label), self.min_width, self.alignment);
        format!("{}{padded}{}", self.prefix, self.suffix)
    }
}
