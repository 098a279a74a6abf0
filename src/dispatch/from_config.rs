//! Dispatcher construction from a loaded [`Config`].

use super::{Dispatcher, DispatcherBuilder};
use crate::config::Config;
use crate::internal;
use crate::level::Level;

impl Dispatcher {
    /// Builds a dispatcher from the default config file. Missing or broken config
    /// falls back to the defaults.
    #[must_use]
    pub fn from_default_config(app_name: &str) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            internal::warn("DISPATCH", &format!("Config not loaded, using defaults: {e}"));
            Config::default()
        });
        Self::from_config(&config, app_name)
    }

    /// `general.app_name` in the config takes precedence over `app_name`.
    #[must_use]
    pub fn from_config(config: &Config, app_name: &str) -> Self {
        let app_name = config.app_name_or(app_name);
        internal::debug("DISPATCH", &format!("Initializing dispatcher for app={app_name}"));

        let mut builder = DispatcherBuilder::new()
            .level(config.parse_level())
            .channel_levels(config.channel_levels())
            .app_name(app_name);
        let mut outputs: Vec<&str> = Vec::new();

        if config.terminal.enabled {
            builder = configure_terminal(builder, config);
            outputs.push("terminal");
        }

        if config.file.enabled {
            builder = builder
                .file()
                .base_dir(&config.file.base_dir)
                .path_structure(&config.file.path_structure)
                .filename_structure(&config.file.filename_structure)
                .content_structure(&config.file.content_structure)
                .timestamp_format(&config.file.timestamp_format)
                .tag_config(config.tag_config())
                .done();
            outputs.push("file");
        }

        if config.json.enabled {
            builder = builder.json().path(&config.json.path).done();
            outputs.push("json");
        }

        if outputs.is_empty() {
            internal::warn("DISPATCH", "No outputs enabled");
        } else {
            internal::debug(
                "DISPATCH",
                &format!("Outputs enabled: [{}]", outputs.join(", ")),
            );
        }

        builder.build()
    }
}

fn configure_terminal(builder: DispatcherBuilder, config: &Config) -> DispatcherBuilder {
    internal::trace(
        "TERMINAL",
        &format!(
            "colors={}, channel_width={}",
            config.terminal.colors, config.terminal.channel_width
        ),
    );

    let mut terminal = builder
        .terminal()
        .colors(config.terminal.colors)
        .structure(&config.terminal.structure)
        .channel_width(config.terminal.channel_width)
        .tag_config(config.tag_config());

    let palette = config.palette();

    // `[colors] info = "#50fa7b"` recolors the level tag as well.
    for level in Level::all() {
        if config.colors.contains_key(level.as_str()) {
            if let Some(color) = palette.get(level.as_str()) {
                terminal = terminal.level_color(level, *color);
            }
        }
    }

    for (name, color) in palette {
        terminal = terminal.color(name, color);
    }

    terminal.done()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_yields_terminal_only() {
        let dispatcher = Dispatcher::from_config(&Config::default(), "demo");
        assert_eq!(dispatcher.output_count(), 1);
        assert_eq!(dispatcher.min_level(), Level::Info);
        assert_eq!(dispatcher.app_name(), Some("demo"));
    }

    #[test]
    fn config_app_name_wins() {
        let mut config = Config::default();
        config.general.app_name = Some("configured".to_string());
        let dispatcher = Dispatcher::from_config(&config, "demo");
        assert_eq!(dispatcher.app_name(), Some("configured"));
    }

    #[test]
    fn channel_overrides_are_applied() {
        let mut config = Config::default();
        config.general.level = "warn".to_string();
        config.channels.insert("db".to_string(), "trace".to_string());
        config.terminal.enabled = false;

        let dispatcher = Dispatcher::from_config(&config, "demo");
        assert_eq!(dispatcher.output_count(), 0);
        assert_eq!(dispatcher.effective_level("db::pool"), Level::Trace);
        assert_eq!(dispatcher.effective_level("web"), Level::Warn);
    }
}
