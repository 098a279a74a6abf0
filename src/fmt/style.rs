//! Inline markup for log messages: XML-like tags (`<bold>`, `<red>`, `<#ff8800>`)
//! that render to ANSI on a color-capable console and strip to plain text everywhere else.

use super::Color;
use std::collections::HashMap;

/// A run of message text and the style it was tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Bold(String),
    Dim(String),
    Italic(String),
    Underline(String),
    /// Text plus the palette name or hex value from the tag.
    Colored(String, String),
}

impl Segment {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(t)
            | Self::Bold(t)
            | Self::Dim(t)
            | Self::Italic(t)
            | Self::Underline(t)
            | Self::Colored(t, _) => t,
        }
    }

    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn render(&self, palette: &HashMap<String, Color>) -> String {
        let (open, text) = match self {
            Self::Plain(t) => return t.clone(),
            Self::Bold(t) => (Color::BOLD.to_string(), t),
            Self::Dim(t) => (Color::DIM.to_string(), t),
            Self::Italic(t) => ("\x1b[3m".to_string(), t),
            Self::Underline(t) => ("\x1b[4m".to_string(), t),
            Self::Colored(t, name) => (Color::resolve(name, palette).fg_ansi(), t),
        };
        format!("{open}{text}{}", Color::RESET)
    }
}

/// Splits a message into styled segments. Only matched `<name>..</name>` pairs count
/// as markup; anything else (`a < b`, `Vec<u8>`) stays plain text.
#[must_use]
pub fn parse(msg: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = msg;

    while let Some(open) = rest.find('<') {
        let Some((segment, consumed)) = tagged_segment(&rest[open..]) else {
            plain.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
            continue;
        };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            segments.push(Segment::Plain(std::mem::take(&mut plain)));
        }
        segments.push(segment);
        rest = &rest[open + consumed..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        segments.push(Segment::Plain(plain));
    }
    segments
}

/// `s` starts with `<`. Returns the segment and the number of bytes it spans.
fn tagged_segment(s: &str) -> Option<(Segment, usize)> {
    let name_end = s.find('>')?;
    let name = &s[1..name_end];
    if !is_tag_name(name) {
        return None;
    }

    let close = format!("</{name}>");
    let body_start = name_end + 1;
    let body_len = s[body_start..].find(&close)?;
    let body = s[body_start..body_start + body_len].to_string();

    let segment = match name.to_lowercase().as_str() {
        "bold" | "b" => Segment::Bold(body),
        "dim" => Segment::Dim(body),
        "italic" | "i" => Segment::Italic(body),
        "underline" | "u" => Segment::Underline(body),
        _ => Segment::Colored(body, name.to_string()),
    };
    Some((segment, body_start + body_len + close.len()))
}

fn is_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '#' || c == '_' || c == '-')
}

/// True when the message carries at least one markup tag.
#[must_use]
pub fn has_markup(msg: &str) -> bool {
    msg.contains('<') && parse(msg).iter().any(|s| !s.is_plain())
}

#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn render(segments: &[Segment], palette: &HashMap<String, Color>) -> String {
    segments.iter().map(|s| s.render(palette)).collect()
}

#[must_use]
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Removes markup tags, keeping their text.
#[must_use]
pub fn strip_tags(msg: &str) -> String {
    if !msg.contains('<') {
        return msg.to_string();
    }
    render_plain(&parse(msg))
}

/// Removes ANSI SGR escapes (`ESC [ ... m`) a caller may have embedded by hand.
#[must_use]
pub fn strip_ansi(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len());
    let mut chars = msg.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Everything a non-console destination should see: markup and escapes removed.
#[must_use]
pub fn plain_text(msg: &str) -> String {
    strip_ansi(&strip_tags(msg))
}
