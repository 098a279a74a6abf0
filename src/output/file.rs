//! Plain-text log files laid out by path and filename templates.

use crate::facade::Record;
use crate::fmt::{FormatTemplate, FormatValues, Placeholder, TagConfig, plain_text};
use crate::internal;

use super::{Output, defaults, push_error_lines};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileOutput {
    /// May start with `~`.
    base_dir: String,
    /// Directory layout below `base_dir`, e.g. `{year}/{month}/{app}`.
    path_template: FormatTemplate,
    filename_template: FormatTemplate,
    content_template: FormatTemplate,
    /// strftime format for `{timestamp}`.
    timestamp_format: String,
    app_name: String,
    tag_config: TagConfig,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: defaults::base_dir(),
            path_template: FormatTemplate::parse(defaults::PATH_STRUCTURE),
            filename_template: FormatTemplate::parse(defaults::FILENAME_STRUCTURE),
            content_template: FormatTemplate::parse(defaults::CONTENT_STRUCTURE),
            timestamp_format: defaults::TIMESTAMP_FORMAT.to_string(),
            app_name: defaults::APP_NAME.to_string(),
            tag_config: TagConfig::default(),
        }
    }

    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use]
    pub fn path_structure(mut self, template: &str) -> Self {
        self.path_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn filename_structure(mut self, template: &str) -> Self {
        self.filename_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn content_structure(mut self, template: &str) -> Self {
        self.content_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    #[must_use]
    pub fn tag_config(mut self, config: TagConfig) -> Self {
        self.tag_config = config;
        self
    }

    fn build_path(&self, record: &Record<'_>) -> PathBuf {
        let now = Local::now();
        let values = FormatValues::new()
            .level(record.level.as_str())
            .channel(file_safe(record.channel))
            .app(&self.app_name)
            .date(
                now.format("%Y").to_string(),
                now.format("%m").to_string(),
                now.format("%d").to_string(),
            );

        let base = PathBuf::from(shellexpand::tilde(&self.base_dir).as_ref());
        base.join(self.path_template.render(&values))
            .join(self.filename_template.render(&values))
    }

    fn format_content(&self, record: &Record<'_>) -> String {
        let mut values = FormatValues::new();
        if self.content_template.uses(Placeholder::Timestamp) {
            values = values.timestamp(Local::now().format(&self.timestamp_format).to_string());
        }
        let values = values
            .tag(self.tag_config.format(record.level))
            .channel(record.channel)
            .msg(plain_text(record.message))
            .level(record.level.as_str())
            .app(&self.app_name);

        let mut content = self.content_template.render(&values);
        push_error_lines(&mut content, record);
        content.push('\n');
        content
    }
}

impl Output for FileOutput {
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
        let path = self.build_path(record);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    internal::error(
                        "FILE",
                        &format!("Failed to create directory {}: {e}", parent.display()),
                    );
                    return Err(e.into());
                }
                internal::debug("FILE", &format!("Created directory: {}", parent.display()));
            }
        }

        // One write per record so concurrent appenders never interleave a line.
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(self.format_content(record).as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}

/// Channel names like `app::net::Conn` or `<T as Trait>` are not valid file names everywhere.
fn file_safe(channel: &str) -> String {
    channel
        .replace("::", ".")
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect()
}
