//! MTP Photo Sync - CLI Entry Point
//!
//! This binary is a thin wrapper around the library, handling argument parsing,
//! logging setup, and command dispatch.

use anyhow::Result;
use clap::Parser;
use log::{Level, Log};
use mtp_photo_sync::cli::{self, Args};
use mtp_photo_sync::core::config::Config;
use mtp_photo_sync::core::logging::{build_logger, emit};

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(ref config_path) = args.config {
        match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        }
    } else {
        Config::load_default().unwrap_or_default()
    };

    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }

    // Initialize logger
    let logger = match build_logger(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!(
                "Warning: Failed to open log file {}: {}",
                config.logging.log_file.display(),
                e
            );
            config.logging.log_to_file = false;
            build_logger(&config.logging)?
        }
    };

    if config.logging.log_to_file {
        emit(
            &logger,
            Level::Debug,
            module_path!(),
            format_args!("Logging to file: {}", config.logging.log_file.display()),
        );
    }

    let result = cli::run_command(&args, &config, &logger);
    logger.flush();
    result
}
