//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List and mirror the photo storage of a phone connected over MTP
#[derive(Parser, Debug)]
#[command(name = "mtp-photo-sync")]
#[command(version)]
#[command(about = "List and mirror the photo storage of a phone connected over MTP", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Use this folder as the photo storage instead of searching for a device
    #[arg(short, long, global = true, value_name = "PATH")]
    pub source: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how much space each top-level photo folder uses, largest first
    List,

    /// Copy photos and videos from the device into a local folder
    Sync {
        /// Local folder that mirrors the device's photo storage
        #[arg(short = 'd', long, value_name = "DIR")]
        local_dir: PathBuf,

        /// File extensions to copy (default from config: .jpg .png .mov)
        #[arg(long, num_args = 0.., value_name = "EXT")]
        file_types: Option<Vec<String>>,

        /// Only log what would be copied
        #[arg(long)]
        dry_run: bool,
    },

    /// Show current configuration
    ShowConfig,

    /// Generate a configuration file
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from(["mtp-photo-sync", "list"]).unwrap();
        assert!(matches!(args.command, Commands::List));
        assert!(args.source.is_none());
    }

    #[test]
    fn test_parse_sync_defaults() {
        let args = Args::try_parse_from(["mtp-photo-sync", "sync", "-d", "backup"]).unwrap();
        match args.command {
            Commands::Sync {
                local_dir,
                file_types,
                dry_run,
            } => {
                assert_eq!(local_dir, PathBuf::from("backup"));
                assert!(file_types.is_none());
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sync_with_types_and_dry_run() {
        let args = Args::try_parse_from([
            "mtp-photo-sync",
            "sync",
            "--local-dir",
            "backup",
            "--file-types",
            ".heic",
            ".jpg",
            "--dry-run",
        ])
        .unwrap();

        match args.command {
            Commands::Sync {
                file_types,
                dry_run,
                ..
            } => {
                assert_eq!(file_types, Some(vec![".heic".to_string(), ".jpg".to_string()]));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sync_requires_local_dir() {
        assert!(Args::try_parse_from(["mtp-photo-sync", "sync"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "mtp-photo-sync",
            "list",
            "--source",
            "/mnt/phone/DCIM",
            "-l",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.source, Some(PathBuf::from("/mnt/phone/DCIM")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
