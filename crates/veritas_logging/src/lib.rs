#![deny(missing_docs)]
//! Shared logging utilities for the Veritas workspace.
//!
//! This crate provides the `veritas_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger, and the terminal/file
//! logger setup used by the front end.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const DEFAULT_LOG_FILE: &str = "./veritas.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! veritas_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! veritas_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! veritas_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! veritas_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! veritas_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to the terminal (stderr/stdout, mixed mode).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl std::str::FromStr for LogDestination {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" | "term" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown log destination '{other}' (expected terminal, file or both)"
            )),
        }
    }
}

/// Initializes the global logger with the given destination and level.
///
/// File output goes to [`DEFAULT_LOG_FILE`]. Returns `false` if no logger
/// could be installed (file not creatable, or a logger already set).
pub fn initialize(destination: LogDestination, level: LevelFilter) -> bool {
    initialize_with_path(destination, level, Path::new(DEFAULT_LOG_FILE))
}

/// Same as [`initialize`], writing file output to `log_path`.
pub fn initialize_with_path(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> bool {
    let loggers = build_loggers(destination, level, log_path);
    if loggers.is_empty() {
        return false;
    }
    CombinedLogger::init(loggers).is_ok()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    match destination {
        LogDestination::File => create_file_logger(level, config, log_path)
            .map(|logger| vec![logger as Box<dyn SharedLogger>])
            .unwrap_or_default(),
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config, log_path) {
                loggers.push(file_logger);
            }
            loggers
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(log_path);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_parses_case_insensitively() {
        assert_eq!("Terminal".parse::<LogDestination>(), Ok(LogDestination::Terminal));
        assert_eq!("FILE".parse::<LogDestination>(), Ok(LogDestination::File));
        assert_eq!(" both ".parse::<LogDestination>(), Ok(LogDestination::Both));
        assert!("syslog".parse::<LogDestination>().is_err());
    }

    #[test]
    fn file_destination_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veritas.log");

        let loggers = build_loggers(LogDestination::File, LevelFilter::Info, &path);

        assert_eq!(loggers.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_file_falls_back_to_terminal_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("veritas.log");

        assert!(build_loggers(LogDestination::File, LevelFilter::Info, &path).is_empty());
        assert_eq!(
            build_loggers(LogDestination::Both, LevelFilter::Info, &path).len(),
            1
        );
    }
}
