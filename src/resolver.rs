use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::config::LoggerConfig;
use crate::model::error::LoggerError;

/// Picks the file a logger writes to.
///
/// An explicit file name wins, then the per-day name for `today`, then the
/// last regular file of the log directory in name order.
pub fn resolve_path(config: &LoggerConfig, today: NaiveDate) -> Result<PathBuf, LoggerError> {
    let dir = &config.log_directory;

    if let Some(name) = config.explicit_file_name() {
        return Ok(dir.join(name));
    }

    if config.create_new_file_per_day {
        return Ok(dir.join(daily_file_name(config, today)));
    }

    most_recent_file(dir)
}

pub fn daily_file_name(config: &LoggerConfig, today: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        config.file_prefix,
        today.format("%Y-%m-%d"),
        config.file_extension
    )
}

fn most_recent_file(dir: &Path) -> Result<PathBuf, LoggerError> {
    let listed = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let entries = fs::read_dir(listed).map_err(|source| LoggerError::DirectoryList {
        path: listed.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoggerError::DirectoryList {
            path: listed.to_path_buf(),
            source,
        })?;
        // Sub-directories are never log files
        if entry.file_type().is_ok_and(|t| t.is_file()) {
            names.push(entry.file_name());
        }
    }

    names.sort_unstable_by(|a, b| b.cmp(a));
    names
        .into_iter()
        .next()
        .map(|name| dir.join(name))
        .ok_or_else(|| LoggerError::DirectoryEmpty {
            path: listed.to_path_buf(),
        })
}
