//! Sections of `loghandle.toml`. Every field has a default so any subset of a
//! section can be written.

use crate::output::defaults;
use serde::Deserialize;
use std::collections::HashMap;

/// `[general]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum level for channels not matched by `[channels]`.
    pub level: String,
    /// Overrides the name passed by the program, for `{app}` and JSON `app`.
    pub app_name: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: crate::Level::default().as_str().to_string(),
            app_name: None,
        }
    }
}

/// `[console]`: the `cout`, `cwarn` and `cerr` streams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// `auto` decides per stream from the terminal and `NO_COLOR`.
    pub colors: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            colors: "auto".to_string(),
        }
    }
}

/// `[terminal]`: the dispatcher's stdout/stderr output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub enabled: bool,
    pub colors: bool,
    /// Placeholders: `{tag}`, `{channel}`, `{msg}`, `{level}`.
    pub structure: String,
    pub channel_width: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: true,
            structure: defaults::TERMINAL_STRUCTURE.to_string(),
            channel_width: defaults::CHANNEL_WIDTH,
        }
    }
}

/// `[file]`: plain-text files below `base_dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    /// `~` is expanded.
    pub base_dir: String,
    pub path_structure: String,
    pub filename_structure: String,
    pub content_structure: String,
    /// chrono strftime syntax.
    pub timestamp_format: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_dir: defaults::base_dir(),
            path_structure: defaults::PATH_STRUCTURE.to_string(),
            filename_structure: defaults::FILENAME_STRUCTURE.to_string(),
            content_structure: defaults::CONTENT_STRUCTURE.to_string(),
            timestamp_format: defaults::TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// `[json]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: defaults::json_path(),
        }
    }
}

/// `[tag]`: how the level column is drawn. String fields are parsed leniently
/// by [`Config::tag_config`](super::Config::tag_config).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TagConfigFile {
    pub prefix: String,
    pub suffix: String,
    /// `none`, `uppercase`, `lowercase` or `capitalize`.
    pub transform: String,
    pub min_width: usize,
    /// `left`, `right` or `center`.
    pub alignment: String,
    /// Level name to label, e.g. `warn = "careful"`.
    pub labels: HashMap<String, String>,
}

impl Default for TagConfigFile {
    fn default() -> Self {
        Self {
            prefix: "[".to_string(),
            suffix: "]".to_string(),
            transform: "uppercase".to_string(),
            min_width: 5,
            alignment: "center".to_string(),
            labels: HashMap::new(),
        }
    }
}
