//! Logger construction and the injected-logger macros
//!
//! The binary builds one [`env_logger::Logger`] at startup and hands a
//! `&dyn Log` to every component. Nothing in this crate installs a global
//! logger; the `log_*!` macros below write to the logger they are given.

use crate::core::config::LoggingConfig;
use crate::core::error::Result;
use env_logger::Builder;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;

/// Writes every log line to stderr and to the log file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

/// Parse a level name, falling back to `Info` for anything unknown
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Build the process logger from the logging configuration
///
/// The log file is opened in append mode so runs accumulate in one file.
pub fn build_logger(config: &LoggingConfig) -> Result<env_logger::Logger> {
    let mut builder = Builder::new();
    builder
        .filter_level(parse_level(&config.level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if config.log_to_file {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;

        builder.target(env_logger::Target::Pipe(Box::new(DualWriter {
            console: std::io::stderr(),
            file: log_file,
        })));
    } else {
        builder.target(env_logger::Target::Stderr);
    }

    Ok(builder.build())
}

/// Send one record to an explicit logger
pub fn emit(logger: &dyn Log, level: Level, target: &str, args: fmt::Arguments<'_>) {
    let metadata = Metadata::builder().level(level).target(target).build();
    if logger.enabled(&metadata) {
        logger.log(
            &Record::builder()
                .metadata(metadata)
                .module_path(Some(target))
                .args(args)
                .build(),
        );
    }
}

macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::core::logging::emit($logger, ::log::Level::Error, module_path!(), format_args!($($arg)+))
    };
}

macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::core::logging::emit($logger, ::log::Level::Warn, module_path!(), format_args!($($arg)+))
    };
}

macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::core::logging::emit($logger, ::log::Level::Info, module_path!(), format_args!($($arg)+))
    };
}

macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::core::logging::emit($logger, ::log::Level::Debug, module_path!(), format_args!($($arg)+))
    };
}

pub(crate) use {log_debug, log_error, log_info, log_warn};
