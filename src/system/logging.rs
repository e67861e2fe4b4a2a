//! Logging system initialization
//!
//! Sets up `tracing` according to the `[logging]` section of the loaded
//! configuration: level filter, text or JSON output, and an optional
//! (rotating) log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{InsightsError, Result};

/// Initialize logging system based on configuration
///
/// Call once during startup, after configuration is loaded.
///
/// # Returns
/// * `WorkerGuard` - must be kept alive for the duration of the program
///   so that buffered log lines are flushed on exit
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    init_logging_to(config, Console::Stdout)
}

/// 未配置日志文件时的控制台输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Stdout,
    /// CLI 模式：stdout 留给报表输出
    Stderr,
}

pub fn init_logging_to(config: &LoggingConfig, console: Console) -> Result<WorkerGuard> {
    let to_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match to_file {
        Some(log_file) if config.enable_rotation => {
            let path = Path::new(log_file);
            let dir = path.parent().unwrap_or(Path::new("."));
            let prefix = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("collateral-insights.log")
                .trim_end_matches(".log")
                .to_string();

            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
                .map_err(|e| {
                    InsightsError::file_operation(format!(
                        "Failed to create rolling log appender: {}",
                        e
                    ))
                })?;
            Box::new(appender)
        }
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Box::new(file)
        }
        None if console == Console::Stderr => Box::new(std::io::stderr()),
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };

    installed.map_err(|e| {
        InsightsError::validation(format!("Failed to install tracing subscriber: {}", e))
    })?;

    Ok(guard)
}
