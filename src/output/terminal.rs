//! Formatted records on stdout/stderr: level-colored tag, dimmed channel, markup rendered.

use crate::facade::Record;
use crate::fmt::{
    Alignment, Color, FormatTemplate, FormatValues, TagConfig, pad, plain_text, style,
};
use crate::level::Level;

use super::{Output, defaults, push_error_lines};
use std::collections::HashMap;
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct TerminalOutput {
    colors_enabled: bool,
    tag_config: TagConfig,
    template: FormatTemplate,
    /// Channels shorter than this are padded so messages line up.
    channel_width: usize,
    palette: HashMap<String, Color>,
    level_colors: HashMap<Level, Color>,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    #[must_use]
    pub fn new() -> Self {
        let level_colors = HashMap::from([
            (Level::Trace, Color::purple()),
            (Level::Debug, Color::purple()),
            (Level::Info, Color::cyan()),
            (Level::Warn, Color::yellow()),
            (Level::Error, Color::red()),
        ]);

        Self {
            colors_enabled: true,
            tag_config: TagConfig::default(),
            template: FormatTemplate::default(),
            channel_width: defaults::CHANNEL_WIDTH,
            palette: Color::default_palette(),
            level_colors,
        }
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn tag_config(mut self, config: TagConfig) -> Self {
        self.tag_config = config;
        self
    }

    #[must_use]
    pub fn template(mut self, template: &str) -> Self {
        self.template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub const fn channel_width(mut self, width: usize) -> Self {
        self.channel_width = width;
        self
    }

    /// Adds or replaces a palette entry usable as `<name>..</name>` in messages.
    #[must_use]
    pub fn color(mut self, name: impl Into<String>, color: Color) -> Self {
        self.palette.insert(name.into(), color);
        self
    }

    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.level_colors.insert(level, color);
        self
    }

    pub(crate) fn format_record(&self, record: &Record<'_>) -> String {
        let tag = self.tag_config.format(record.level);
        let channel = pad(record.channel, self.channel_width, Alignment::Left);

        let values = if self.colors_enabled {
            let level_color = self
                .level_colors
                .get(&record.level)
                .copied()
                .unwrap_or_else(Color::white);
            FormatValues::new()
                .tag(format!("{}{tag}{}", level_color.fg_ansi(), Color::RESET))
                .channel(format!("{}{channel}{}", Color::DIM, Color::RESET))
                .msg(style::render(&style::parse(record.message), &self.palette))
        } else {
            FormatValues::new()
                .tag(tag)
                .channel(channel)
                .msg(plain_text(record.message))
        };

        let mut line = self.template.render(&values.level(record.level.as_str()));
        push_error_lines(&mut line, record);
        line
    }
}

impl Output for TerminalOutput {
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
        let line = self.format_record(record);
        if record.level >= Level::Warn {
            writeln!(io::stderr().lock(), "{line}")?;
        } else {
            writeln!(io::stdout().lock(), "{line}")?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}
