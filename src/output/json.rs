//! JSON lines: one object per record, queryable with `jq` and friends.

use super::{Output, defaults};
use crate::facade::Record;
use crate::fmt::plain_text;
use crate::internal;

use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use ulid::Ulid;

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    /// Time-sortable and unique across concurrent writers.
    id: String,
    ts: String,
    level: &'a str,
    channel: &'a str,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    app: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    error: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JsonOutput {
    /// May start with `~`.
    file_path: PathBuf,
    app_name: Option<String>,
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_path: PathBuf::from(defaults::json_path()),
            app_name: None,
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    fn resolve_path(&self) -> PathBuf {
        let raw = self.file_path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).as_ref())
    }

    fn to_line(&self, record: &Record<'_>) -> Result<String, crate::Error> {
        let entry = JsonEntry {
            id: Ulid::new().to_string(),
            ts: Local::now().to_rfc3339(),
            level: record.level.as_str(),
            channel: record.channel,
            msg: plain_text(record.message),
            app: self.app_name.as_deref(),
            error: record.error_chain(),
        };
        Ok(serde_json::to_string(&entry)?)
    }
}

impl Output for JsonOutput {
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
        let path = self.resolve_path();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    internal::error(
                        "JSON",
                        &format!("Failed to create directory {}: {e}", parent.display()),
                    );
                    return Err(e.into());
                }
            }
        }

        let line = self.to_line(record)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
