//! Stepwise construction of a [`Dispatcher`]: levels first, then one sub-builder per
//! output, each returning to the parent with `done()`.

use super::Dispatcher;
use crate::fmt::{Color, TagConfig};
use crate::level::Level;
use crate::output::{FileOutput, JsonOutput, Output, TerminalOutput};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Default)]
pub struct DispatcherBuilder {
    min_level: Level,
    channel_levels: HashMap<String, Level>,
    outputs: Vec<Box<dyn Output>>,
    app_name: Option<String>,
}

impl DispatcherBuilder {
    /// Info by default; debug and trace are opt-in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Overrides the level for `channel` and every channel below it (`channel::*`).
    #[must_use]
    pub fn channel_level(mut self, channel: impl Into<String>, level: Level) -> Self {
        self.channel_levels.insert(channel.into(), level);
        self
    }

    #[must_use]
    pub fn channel_levels(mut self, levels: HashMap<String, Level>) -> Self {
        self.channel_levels.extend(levels);
        self
    }

    /// Set before `file()` or `json()` so those outputs pick it up.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        OutputBuilder::new(self, TerminalOutput::new())
    }

    #[must_use]
    pub fn file(self) -> FileBuilder {
        let output = match &self.app_name {
            Some(app) => FileOutput::new().app_name(app),
            None => FileOutput::new(),
        };
        OutputBuilder::new(self, output)
    }

    #[must_use]
    pub fn json(self) -> JsonBuilder {
        let output = match &self.app_name {
            Some(app) => JsonOutput::new().app_name(app),
            None => JsonOutput::new(),
        };
        OutputBuilder::new(self, output)
    }

    /// Adds a caller-provided backend.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    #[must_use]
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            min_level: self.min_level,
            channel_levels: self.channel_levels,
            outputs: self.outputs,
            app_name: self.app_name,
        }
    }
}

/// Configures one built-in output, then hands it to the parent on `done()`.
pub struct OutputBuilder<O> {
    parent: DispatcherBuilder,
    output: O,
}

pub type TerminalBuilder = OutputBuilder<TerminalOutput>;
pub type FileBuilder = OutputBuilder<FileOutput>;
pub type JsonBuilder = OutputBuilder<JsonOutput>;

impl<O: Output + 'static> OutputBuilder<O> {
    fn new(parent: DispatcherBuilder, output: O) -> Self {
        Self { parent, output }
    }

    /// Applies any of the output's own builder methods.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(O) -> O) -> Self {
        self.output = f(self.output);
        self
    }

    #[must_use]
    pub fn done(self) -> DispatcherBuilder {
        self.parent.output(self.output)
    }
}

impl TerminalBuilder {
    /// ANSI escapes break piped output.
    #[must_use]
    pub fn colors(self, enabled: bool) -> Self {
        self.configure(|o| o.colors(enabled))
    }

    #[must_use]
    pub fn structure(self, template: &str) -> Self {
        self.configure(|o| o.template(template))
    }

    #[must_use]
    pub fn channel_width(self, width: usize) -> Self {
        self.configure(|o| o.channel_width(width))
    }

    #[must_use]
    pub fn tag_config(self, config: TagConfig) -> Self {
        self.configure(|o| o.tag_config(config))
    }

    #[must_use]
    pub fn color(self, name: impl Into<String>, color: Color) -> Self {
        self.configure(|o| o.color(name, color))
    }

    #[must_use]
    pub fn level_color(self, level: Level, color: Color) -> Self {
        self.configure(|o| o.level_color(level, color))
    }
}

impl FileBuilder {
    #[must_use]
    pub fn base_dir(self, dir: impl Into<String>) -> Self {
        self.configure(|o| o.base_dir(dir))
    }

    /// Directory layout below `base_dir`, e.g. `{year}/{month}/{app}`.
    #[must_use]
    pub fn path_structure(self, template: &str) -> Self {
        self.configure(|o| o.path_structure(template))
    }

    #[must_use]
    pub fn filename_structure(self, template: &str) -> Self {
        self.configure(|o| o.filename_structure(template))
    }

    #[must_use]
    pub fn content_structure(self, template: &str) -> Self {
        self.configure(|o| o.content_structure(template))
    }

    #[must_use]
    pub fn timestamp_format(self, format: impl Into<String>) -> Self {
        self.configure(|o| o.timestamp_format(format))
    }

    #[must_use]
    pub fn app_name(self, name: impl Into<String>) -> Self {
        self.configure(|o| o.app_name(name))
    }

    #[must_use]
    pub fn tag_config(self, config: TagConfig) -> Self {
        self.configure(|o| o.tag_config(config))
    }
}

impl JsonBuilder {
    #[must_use]
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        self.configure(|o| o.path(path))
    }

    #[must_use]
    pub fn app_name(self, name: impl Into<String>) -> Self {
        self.configure(|o| o.app_name(name))
    }
}
