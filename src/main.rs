use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use file_logger::{FileLogger, Level, LoggerConfig, LoggerError, Message, StaticAddresses};

/// Append one line to a log file.
#[derive(Debug, Parser)]
#[command(name = "file_logger", version)]
struct Cli {
    /// Directory holding the log files [default: current directory]
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Explicit file name, overrides the per-day name
    #[arg(long)]
    file: Option<String>,
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long)]
    extension: Option<String>,
    /// strftime format of the line timestamp
    #[arg(long)]
    date_format: Option<String>,
    /// Append to the most recent file of the directory instead of today's file
    #[arg(long)]
    no_daily: bool,
    /// Truncate the file before writing
    #[arg(long)]
    clear: bool,
    #[arg(long)]
    initiator: Option<String>,
    /// Level tag, e.g. info, warning, error, fatal, debug, visit
    #[arg(long)]
    level: Option<String>,
    #[arg(long, requires = "remote_addr")]
    server_addr: Option<String>,
    #[arg(long, requires = "server_addr")]
    remote_addr: Option<String>,
    /// Parse MESSAGE as JSON and dump the value
    #[arg(long)]
    json: bool,
    /// Build the logger switched off
    #[arg(long)]
    disabled: bool,
    message: String,
}

impl Cli {
    fn config(&self) -> LoggerConfig {
        let mut config = LoggerConfig::new()
            .create_new_file_per_day(!self.no_daily)
            .clear_file_on_open(self.clear)
            .include_client_ip(self.server_addr.is_some());

        if let Some(dir) = &self.dir {
            config = config.log_directory(dir);
        }
        if let Some(file) = &self.file {
            config = config.file_name(file);
        }
        if let Some(prefix) = &self.prefix {
            config = config.file_prefix(prefix);
        }
        if let Some(extension) = &self.extension {
            config = config.file_extension(extension);
        }
        if let Some(format) = &self.date_format {
            config = config.date_format(format);
        }
        if let Some(initiator) = &self.initiator {
            config = config.initiator_label(initiator);
        }
        config
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Invalid(#[from] LoggerError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let logger = FileLogger::new(cli.config(), !cli.disabled);
    if !logger.is_enabled() {
        println!("{}", logger.result_message());
        return Ok(());
    }
    if !logger.is_ok() {
        return Err(CliError::Rejected(logger.result_message()));
    }

    let logger = match (cli.server_addr, cli.remote_addr) {
        (Some(server), Some(remote)) => {
            logger.with_request_context(Arc::new(StaticAddresses::new(server, remote)))
        }
        _ => logger,
    };

    let message = if cli.json {
        Message::from_json_str(&cli.message)?
    } else {
        Message::from(cli.message)
    };
    let level = match cli.level {
        Some(level) => level
            .parse::<Level>()
            .map(|known| known.as_str().to_string())
            .unwrap_or_else(|_| level.to_uppercase()),
        None => String::new(),
    };

    if !logger.log(message, &level) {
        return Err(CliError::Rejected(logger.result_message()));
    }

    if let Some(path) = logger.resolved_path() {
        println!("{}", path.display());
    }
    Ok(())
}
