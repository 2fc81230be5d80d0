use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

use crate::context::{ip_segment, RequestContext};
use crate::model::config::{LoggerConfig, DEFAULT_DATE_FORMAT};
use crate::model::error::{LoggerError, Status};
use crate::model::level::Level;
use crate::model::message::Message;
use crate::resolver::resolve_path;

/// Appends timestamped, leveled lines to a single file chosen at construction.
///
/// Nothing here panics or returns an error to the host on a failed open or
/// write: the outcome of the latest operation is kept in [`Status`] and each
/// log call reports success as a `bool`. Use [`FileLogger::try_log`] to get
/// the error value itself.
pub struct FileLogger {
    config: LoggerConfig,
    date_format: String,
    enabled: AtomicBool,
    path: Option<PathBuf>,
    context: Option<Arc<dyn RequestContext>>,
    status: Mutex<Status>,
}

impl FileLogger {
    pub fn new(config: LoggerConfig, enabled: bool) -> Self {
        Self::new_on(config, enabled, Local::now().date_naive())
    }

    /// Builds a logger as if today were `today`.
    pub fn new_on(config: LoggerConfig, enabled: bool, today: NaiveDate) -> Self {
        let date_format = if config.has_valid_date_format() {
            config.date_format.clone()
        } else {
            DEFAULT_DATE_FORMAT.to_string()
        };

        let mut logger = FileLogger {
            config,
            date_format,
            enabled: AtomicBool::new(enabled),
            path: None,
            context: None,
            status: Mutex::new(Status::success("logger disabled")),
        };

        if !enabled {
            return logger;
        }

        let status = match logger.open(today) {
            Ok(message) => {
                log::debug!("{}", message);
                Status::success(message)
            }
            Err(err) => {
                log::warn!("file logger not ready: {}", err);
                Status::failure(&err)
            }
        };
        *logger.status.get_mut() = status;
        logger
    }

    /// Resolves the target path and makes sure the file exists.
    fn open(&mut self, today: NaiveDate) -> Result<String, LoggerError> {
        let path = resolve_path(&self.config, today)?;
        let message = prepare_file(&path, self.config.clear_file_on_open);
        self.path = Some(path);
        let message = message?;

        if !self.config.has_valid_date_format() {
            return Err(LoggerError::InvalidDateFormat(self.config.date_format.clone()));
        }
        Ok(message)
    }

    /// Sets the provider consulted for the IP segment of each line.
    pub fn with_request_context(mut self, context: Arc<dyn RequestContext>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn resolved_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status.lock().clone()
    }

    pub fn is_ok(&self) -> bool {
        self.status.lock().ok
    }

    pub fn result_message(&self) -> String {
        self.status.lock().message.clone()
    }

    /// Writes one line and returns the outcome. Does not touch the status.
    pub fn try_log<M: Into<Message>>(&self, message: M, level: &str) -> Result<(), LoggerError> {
        if !self.is_enabled() {
            return Err(LoggerError::Disabled);
        }
        self.write_entry(&message.into(), level, self.context.as_deref())
    }

    /// Writes one line, records the outcome and returns true on success.
    ///
    /// Returns false without doing any work when the logger is disabled.
    pub fn log<M: Into<Message>>(&self, message: M, level: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let result = self.write_entry(&message.into(), level, self.context.as_deref());
        self.record(result)
    }

    pub fn log_at<M: Into<Message>>(&self, level: Level, message: M) -> bool {
        self.log(message, level.as_str())
    }

    /// Like [`FileLogger::log`], taking the addresses from `context` instead
    /// of the logger's own provider.
    pub fn log_with_context<M: Into<Message>>(
        &self,
        context: &dyn RequestContext,
        message: M,
        level: &str,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let result = self.write_entry(&message.into(), level, Some(context));
        self.record(result)
    }

    pub fn info<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Info, message)
    }

    pub fn warning<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Warning, message)
    }

    pub fn error<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Error, message)
    }

    pub fn fatal<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Fatal, message)
    }

    pub fn debug<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Debug, message)
    }

    pub fn visit<M: Into<Message>>(&self, message: M) -> bool {
        self.log_at(Level::Visit, message)
    }

    /// Registers this logger as the `log` crate backend.
    pub fn install(self, max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    // Must not emit `log` records: this logger may be the global backend.
    fn write_entry(
        &self,
        message: &Message,
        level: &str,
        context: Option<&dyn RequestContext>,
    ) -> Result<(), LoggerError> {
        let path = self.path.as_deref().ok_or(LoggerError::NoResolvedFile)?;
        let line = self.format_line(message, level, context)?;
        append_line(path, &line)
    }

    fn format_line(
        &self,
        message: &Message,
        level: &str,
        context: Option<&dyn RequestContext>,
    ) -> Result<String, LoggerError> {
        let mut line = String::new();
        write!(line, "{}", Local::now().format(&self.date_format))
            .map_err(|_| LoggerError::InvalidDateFormat(self.date_format.clone()))?;

        if !self.config.initiator_label.is_empty() {
            line.push_str(" (");
            push_escaped(&mut line, &self.config.initiator_label);
            line.push_str(") ");
        }

        if self.config.include_client_ip {
            if let Some(context) = context {
                push_escaped(&mut line, &ip_segment(context));
            }
        }

        line.push_str(" --- ");
        if !level.is_empty() {
            line.push_str(level);
            line.push_str(": ");
        }
        line.push_str(&message.dump());
        line.push('\n');
        Ok(line)
    }

    fn record(&self, result: Result<(), LoggerError>) -> bool {
        let status = match &result {
            Ok(()) => Status::success(match &self.path {
                Some(path) => format!("line appended to {}", path.display()),
                None => "line appended".to_string(),
            }),
            Err(err) => Status::failure(err),
        };
        *self.status.lock() = status;
        result.is_ok()
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        self.is_enabled()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = Message::Str(record.args().to_string());
        let level = Level::from(record.level());
        let result = self.write_entry(&message, level.as_str(), self.context.as_deref());
        self.record(result);
    }

    fn flush(&self) {}
}

/// Copies `text` into `line` with control characters escaped, so free-text
/// segments cannot break a line.
fn push_escaped(line: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_control() {
            line.extend(c.escape_debug());
        } else {
            line.push(c);
        }
    }
}

/// Maps a failed open of an existing file: a permission refusal means the
/// file is not writable for this process.
fn existing_file_error(path: &Path, source: io::Error) -> LoggerError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        LoggerError::FileUnwritable {
            path: path.to_path_buf(),
        }
    } else {
        LoggerError::FileAppendFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn prepare_file(path: &Path, clear: bool) -> Result<String, LoggerError> {
    match fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => Err(LoggerError::FileUnwritable {
            path: path.to_path_buf(),
        }),
        Ok(_) if clear => {
            File::create(path).map_err(|source| match source.kind() {
                io::ErrorKind::PermissionDenied => LoggerError::FileUnwritable {
                    path: path.to_path_buf(),
                },
                _ => LoggerError::FileCreateFailed {
                    path: path.to_path_buf(),
                    source,
                },
            })?;
            Ok(format!("cleared file: {}", path.display()))
        }
        Ok(_) => {
            OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(|source| existing_file_error(path, source))?;
            Ok(format!("opened file for appending: {}", path.display()))
        }
        Err(_) => {
            create_empty(path)?;
            Ok(format!("created new file: {}", path.display()))
        }
    }
}

fn create_empty(path: &Path) -> Result<(), LoggerError> {
    File::create(path)
        .map(drop)
        .map_err(|source| LoggerError::FileCreateFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Appends `line` under an exclusive lock held for this write only.
fn append_line(path: &Path, line: &str) -> Result<(), LoggerError> {
    let append_failed = |source: io::Error| LoggerError::FileAppendFailed {
        path: path.to_path_buf(),
        source,
    };

    // Permission bits are honoured even for privileged users
    let exists = match fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(LoggerError::FileUnwritable {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => true,
        Err(_) => false,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
            if exists {
                existing_file_error(path, source)
            } else {
                append_failed(source)
            }
        })?;

    file.lock().map_err(append_failed)?;
    file.write_all(line.as_bytes()).map_err(append_failed)
    // dropping the handle releases the lock
}
