//! Line templates for the built-in outputs: `"{tag} {channel}  {msg}"` for the terminal,
//! `"{timestamp} {tag} {channel}  {msg}"` for files, `"{year}/{month}/{app}"` for paths.

use std::borrow::Cow;

/// Known substitution tokens. Unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Tag,
    Channel,
    Msg,
    Timestamp,
    Level,
    App,
    Year,
    Month,
    Day,
}

impl Placeholder {
    /// Declaration order; doubles as the slot index in [`FormatValues`].
    pub const ALL: [Self; 9] = [
        Self::Tag,
        Self::Channel,
        Self::Msg,
        Self::Timestamp,
        Self::Level,
        Self::App,
        Self::Year,
        Self::Month,
        Self::Day,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Channel => "channel",
            Self::Msg => "msg",
            Self::Timestamp => "timestamp",
            Self::Level => "level",
            Self::App => "app",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ph| ph.as_str() == name)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A template parsed once and rendered for every record.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
    /// Sum of literal lengths, used to size the output buffer.
    literal_len: usize,
}

impl FormatTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(len) = rest[open..].find('}') else {
                break;
            };
            let name = &rest[open + 1..open + len];
            literal.push_str(&rest[..open]);

            match Placeholder::lookup(name) {
                Some(ph) => {
                    if !literal.is_empty() {
                        segments.push(FormatSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(FormatSegment::Placeholder(ph));
                }
                None => literal.push_str(&rest[open..=open + len]),
            }
            rest = &rest[open + len + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(FormatSegment::Literal(literal));
        }

        let literal_len = segments
            .iter()
            .map(|segment| match segment {
                FormatSegment::Literal(s) => s.len(),
                FormatSegment::Placeholder(_) => 0,
            })
            .sum();
        Self {
            segments,
            literal_len,
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Whether rendering reads `ph` at all, so callers can skip computing it.
    #[must_use]
    pub fn uses(&self, ph: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == FormatSegment::Placeholder(ph))
    }

    #[must_use]
    pub fn render(&self, values: &FormatValues<'_>) -> String {
        let mut out = String::with_capacity(self.literal_len + values.len_hint());
        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => out.push_str(s),
                FormatSegment::Placeholder(ph) => out.push_str(values.get(*ph)),
            }
        }
        out
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse(crate::output::defaults::TERMINAL_STRUCTURE)
    }
}

/// Substitutions for one render, borrowed where the caller already holds the text.
/// Unset placeholders render as empty strings.
#[derive(Debug, Clone, Default)]
pub struct FormatValues<'a> {
    slots: [Cow<'a, str>; Placeholder::ALL.len()],
}

impl<'a> FormatValues<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, ph: Placeholder, value: impl Into<Cow<'a, str>>) -> Self {
        self.slots[ph.slot()] = value.into();
        self
    }

    #[must_use]
    pub fn get(&self, ph: Placeholder) -> &str {
        &self.slots[ph.slot()]
    }

    #[must_use]
    pub fn tag(self, tag: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::Tag, tag)
    }

    #[must_use]
    pub fn channel(self, channel: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::Channel, channel)
    }

    #[must_use]
    pub fn msg(self, msg: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::Msg, msg)
    }

    #[must_use]
    pub fn timestamp(self, timestamp: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::Timestamp, timestamp)
    }

    #[must_use]
    pub fn level(self, level: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::Level, level)
    }

    #[must_use]
    pub fn app(self, app: impl Into<Cow<'a, str>>) -> Self {
        self.set(Placeholder::App, app)
    }

    #[must_use]
    pub fn date(
        self,
        year: impl Into<Cow<'a, str>>,
        month: impl Into<Cow<'a, str>>,
        day: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.set(Placeholder::Year, year)
            .set(Placeholder::Month, month)
            .set(Placeholder::Day, day)
    }

    fn len_hint(&self) -> usize {
        self.slots.iter().map(|s| s.len()).sum()
    }
}
