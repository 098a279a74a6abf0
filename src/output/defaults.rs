//! Values shared by the output constructors and the config schema, so an empty
//! config file and `Dispatcher::builder()` produce the same lines.

pub const TERMINAL_STRUCTURE: &str = "{tag} {channel}  {msg}";
pub const CHANNEL_WIDTH: usize = 12;

pub const PATH_STRUCTURE: &str = "{year}/{month}/{app}";
pub const FILENAME_STRUCTURE: &str = "{channel}_{day}.log";
pub const CONTENT_STRUCTURE: &str = "{timestamp} {tag} {channel}  {msg}";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Used for `{app}` when neither the config nor the caller names one.
pub const APP_NAME: &str = "loghandle";

/// `<state dir>/logs`, or `./logs` without a home directory.
pub fn base_dir() -> String {
    state_path("logs", "logs")
}

/// `<state dir>/loghandle.jsonl`.
pub fn json_path() -> String {
    state_path("loghandle.jsonl", "loghandle.jsonl")
}

fn state_path(leaf: &str, fallback: &str) -> String {
    directories::ProjectDirs::from("", "", APP_NAME).map_or_else(
        || fallback.to_string(),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join(leaf)
                .to_string_lossy()
                .into_owned()
        },
    )
}
