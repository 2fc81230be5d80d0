use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Twelve-hour clock, no AM/PM marker.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// Options a `FileLogger` is built from.
///
/// Anything left out of a deserialized options object falls back to
/// `LoggerConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub log_directory: PathBuf,
    pub file_name: Option<String>,
    pub date_format: String,
    pub create_new_file_per_day: bool,
    pub clear_file_on_open: bool,
    pub file_extension: String,
    pub file_prefix: String,
    pub initiator_label: String,
    #[serde(rename = "includeClientIP")]
    pub include_client_ip: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            log_directory: PathBuf::new(),
            file_name: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            create_new_file_per_day: true,
            clear_file_on_open: false,
            file_extension: "txt".to_string(),
            file_prefix: "log_".to_string(),
            initiator_label: String::new(),
            include_client_ip: true,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_directory = dir.into();
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn create_new_file_per_day(mut self, enabled: bool) -> Self {
        self.create_new_file_per_day = enabled;
        self
    }

    pub fn clear_file_on_open(mut self, enabled: bool) -> Self {
        self.clear_file_on_open = enabled;
        self
    }

    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn initiator_label(mut self, label: impl Into<String>) -> Self {
        self.initiator_label = label.into();
        self
    }

    pub fn include_client_ip(mut self, enabled: bool) -> Self {
        self.include_client_ip = enabled;
        self
    }

    /// Explicit file name, with an empty string treated as absent.
    pub fn explicit_file_name(&self) -> Option<&str> {
        self.file_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns true if chrono can render `date_format` without error.
    pub fn has_valid_date_format(&self) -> bool {
        !StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
    }
}
