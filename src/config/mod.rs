//! TOML configuration: loading, `source = "..."` includes, and conversion into the
//! typed values the dispatcher and console need.

mod structs;

pub use structs::{
    ConsoleConfig, FileConfig, GeneralConfig, JsonConfig, TagConfigFile, TerminalConfig,
};

use crate::console::ColorChoice;
use crate::fmt::{Alignment, Color, TagConfig, Transform};
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Every field defaults, so an empty file is a working config.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// Channel name (or `::`-separated prefix) to level.
    pub channels: HashMap<String, String>,
    pub console: ConsoleConfig,
    pub terminal: TerminalConfig,
    pub file: FileConfig,
    pub json: JsonConfig,
    pub tag: TagConfigFile,
    /// Extra markup palette entries, name to `#RRGGBB`.
    pub colors: HashMap<String, String>,
}

/// Pulls `source = "..."` lines out of raw TOML before deserialization.
/// Returns the include paths and the remaining content.
#[doc(hidden)]
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::new();

    for line in content.lines() {
        let include = line
            .trim()
            .strip_prefix("source")
            .and_then(|rest| rest.trim_start().strip_prefix('='))
            .map(|path| path.trim().trim_matches('"').trim_matches('\''));

        match include {
            Some(path) if !path.is_empty() => sources.push(path.to_string()),
            Some(_) => {}
            None => {
                remaining.push_str(line);
                remaining.push('\n');
            }
        }
    }

    (sources, remaining)
}

impl Config {
    /// Loads the config from the default location, resolving includes.
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, a file can't be read,
    /// TOML parsing fails, or includes form a cycle.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        let config = Self::load_from(&path)?;
        internal::debug("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or contains cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Self::load_with_sources(path, &mut HashSet::new())
    }

    /// `stack` holds the files currently being expanded, so a file included twice
    /// from different branches is fine but a file including itself is not.
    fn load_with_sources(path: &Path, stack: &mut HashSet<PathBuf>) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !stack.insert(canonical.clone()) {
            internal::warn(
                "CONFIG",
                &format!("Cyclic include detected: {}", canonical.display()),
            );
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut config: Self = toml::from_str(&toml_content)?;

        for source in sources {
            let expanded = shellexpand::tilde(&source);
            let source_file = Path::new(expanded.as_ref());
            if source_file.exists() {
                let included = Self::load_with_sources(source_file, stack)?;
                config.merge(included);
            } else {
                internal::warn("CONFIG", &format!("Source file not found: {source}"));
            }
        }

        stack.remove(&canonical);
        Ok(config)
    }

    /// Folds an included config's maps into `self`; keys already present win.
    pub fn merge(&mut self, other: Self) {
        for (k, v) in other.channels {
            self.channels.entry(k).or_insert(v);
        }
        for (k, v) in other.colors {
            self.colors.entry(k).or_insert(v);
        }
        for (k, v) in other.tag.labels {
            self.tag.labels.entry(k).or_insert(v);
        }
    }

    /// `<config dir>/loghandle/loghandle.toml` (XDG on Linux).
    ///
    /// # Errors
    /// Fails when the platform has no config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "loghandle")
            .map(|dirs| dirs.config_dir().join("loghandle.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Unknown level strings fall back to info.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or_else(|_| {
            internal::warn(
                "CONFIG",
                &format!("Unknown level '{}', using info", self.general.level),
            );
            Level::Info
        })
    }

    /// `[channels]` as typed levels. Entries with unknown levels are skipped.
    #[must_use]
    pub fn channel_levels(&self) -> HashMap<String, Level> {
        self.channels
            .iter()
            .filter_map(|(channel, level)| match level.parse() {
                Ok(level) => Some((channel.clone(), level)),
                Err(e) => {
                    internal::warn("CONFIG", &format!("[channels] {channel}: {e}"));
                    None
                }
            })
            .collect()
    }

    #[must_use]
    pub fn color_choice(&self) -> ColorChoice {
        self.console.colors.parse().unwrap_or_default()
    }

    /// Built-in palette overlaid with `[colors]`. Malformed hex values are skipped.
    #[must_use]
    pub fn palette(&self) -> HashMap<String, Color> {
        let mut palette = Color::default_palette();
        for (name, hex) in &self.colors {
            match Color::from_hex(hex) {
                Some(color) => {
                    palette.insert(name.to_lowercase(), color);
                }
                None => internal::warn("CONFIG", &format!("[colors] {name}: bad hex '{hex}'")),
            }
        }
        palette
    }

    #[must_use]
    pub fn tag_config(&self) -> TagConfig {
        let mut tags = TagConfig::new()
            .prefix(&self.tag.prefix)
            .suffix(&self.tag.suffix)
            .transform(self.tag.transform.parse().unwrap_or(Transform::None))
            .min_width(self.tag.min_width)
            .alignment(self.tag.alignment.parse().unwrap_or(Alignment::Center));

        for (level, label) in &self.tag.labels {
            if let Ok(level) = level.parse::<Level>() {
                tags = tags.label(level, label);
            }
        }
        tags
    }

    /// `general.app_name`, or `fallback` when unset.
    #[must_use]
    pub fn app_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.general.app_name.as_deref().unwrap_or(fallback)
    }
}
