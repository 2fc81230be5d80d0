use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger disabled")]
    Disabled,
    #[error("file exists but is not writable: {}", path.display())]
    FileUnwritable { path: PathBuf },
    #[error("cannot create file {}: {source}", path.display())]
    FileCreateFailed { path: PathBuf, source: io::Error },
    #[error("cannot append to file {}: {source}", path.display())]
    FileAppendFailed { path: PathBuf, source: io::Error },
    #[error("cannot list log directory {}: {source}", path.display())]
    DirectoryList { path: PathBuf, source: io::Error },
    #[error("no log file found in directory {}", path.display())]
    DirectoryEmpty { path: PathBuf },
    #[error("no log file resolved")]
    NoResolvedFile,
    #[error("invalid date format {0:?}")]
    InvalidDateFormat(String),
    #[error("cannot render message: {0}")]
    Render(#[from] serde_json::Error),
}

/// Outcome of the most recent construction or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub ok: bool,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Status {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(err: &LoggerError) -> Self {
        Status {
            ok: false,
            message: err.to_string(),
        }
    }
}
