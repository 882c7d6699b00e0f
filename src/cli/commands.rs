//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::progress::FolderSizeSpinner;
use crate::cli::{Args, Commands};
use crate::core::config::{get_config_path, Config};
use crate::core::lister::{build_size_report, print_size_report};
use crate::core::logging::{log_error, log_info, log_warn};
use crate::core::sync::{FolderSync, SyncPolicy};
use crate::device::traits::{ItemCopierTrait, ShellFolderTrait};
use anyhow::{Context, Result};
use log::Log;
use std::path::PathBuf;

/// Work to run against the photo-storage root once it has been opened
#[derive(Debug, Clone)]
pub enum DeviceAction {
    /// Print the per-folder size report
    List,
    /// Mirror matching files into a local directory
    Sync(SyncPolicy),
}

impl DeviceAction {
    /// Run the action against an opened root folder
    pub fn run<F, C>(&self, root: &F, copier: &C, log: &dyn Log) -> Result<()>
    where
        F: ShellFolderTrait,
        C: ItemCopierTrait,
    {
        match self {
            DeviceAction::List => list_folders(root, log),
            DeviceAction::Sync(policy) => {
                let stats = FolderSync::new(policy, copier, log).run(root)?;
                log_info!(log, "{}", stats.summary(policy.dry_run));
                Ok(())
            }
        }
    }
}

/// Run the appropriate command based on CLI arguments
///
/// Fatal errors are logged with their full cause chain before being returned.
pub fn run_command(args: &Args, config: &Config, log: &dyn Log) -> Result<()> {
    log_info!(log, "{} v{}", crate::NAME, crate::VERSION);

    let result = match &args.command {
        Commands::ShowConfig => show_config(config),
        Commands::GenerateConfig { output } => generate_config_file(output.clone(), log),
        Commands::List => run_on_device(args, config, &DeviceAction::List, log),
        Commands::Sync {
            local_dir,
            file_types,
            dry_run,
        } => {
            let types = file_types.as_ref().unwrap_or(&config.sync.file_types);
            let policy = SyncPolicy::new(local_dir, types, *dry_run);
            log_info!(
                log,
                "File types: {}",
                policy.allowlist.iter().cloned().collect::<Vec<_>>().join(", ")
            );
            if policy.allowlist.is_empty() {
                log_warn!(log, "No file types selected; no files will be copied");
            }
            run_on_device(args, config, &DeviceAction::Sync(policy), log)
        }
    };

    if let Err(e) = &result {
        log_error!(log, "{:?}", e);
    }
    result
}

/// Measure every top-level folder and print the report to stdout
fn list_folders<F: ShellFolderTrait>(root: &F, log: &dyn Log) -> Result<()> {
    let mut spinner = FolderSizeSpinner::new();
    let report = build_size_report(root, log, |name, bytes| spinner.folder_done(name, bytes));
    spinner.finish();

    let report = report.with_context(|| format!("Failed to list '{}'", root.location()))?;
    print_size_report(&report, &mut std::io::stdout().lock())?;
    Ok(())
}

/// Locate and open the photo storage on Windows, then run `action`
#[cfg(windows)]
fn run_on_device(args: &Args, config: &Config, action: &DeviceAction, log: &dyn Log) -> Result<()> {
    use crate::core::locator::require_photo_root;
    use crate::device::shell::{initialize_com, ShellCopier, ShellFolder, ShellNamespace};

    let _com_guard = initialize_com().context("Failed to initialize COM")?;

    let root_path = match &args.source {
        Some(source) => source.clone(),
        None => {
            let namespace = ShellNamespace::computer().context("Failed to open 'This PC'")?;
            require_photo_root(
                &namespace,
                &config.device.vendor_marker,
                &config.device.photo_subpath,
                log,
            )
            .context("Failed to find the photo folder on the device")?
        }
    };
    log_info!(log, "Photo storage: {}", root_path.display());

    let root = ShellFolder::from_parsing_name(&root_path)
        .with_context(|| format!("Failed to open '{}'", root_path.display()))?;
    action.run(&root, &ShellCopier, log)
}

/// Locate and open the photo storage on a mounted filesystem, then run `action`
#[cfg(not(windows))]
fn run_on_device(args: &Args, config: &Config, action: &DeviceAction, log: &dyn Log) -> Result<()> {
    use crate::core::locator::require_photo_root;
    use crate::device::local::{DirectoryNamespace, LocalCopier, LocalFolder};

    let root_path = match &args.source {
        Some(source) => source.clone(),
        None => {
            let namespace_root = config.device.effective_namespace_root().context(
                "No device mount directory known; set device.namespace_root or pass --source",
            )?;
            require_photo_root(
                &DirectoryNamespace::new(namespace_root),
                &config.device.vendor_marker,
                &config.device.photo_subpath,
                log,
            )
            .context("Failed to find the photo folder on the device")?
        }
    };
    log_info!(log, "Photo storage: {}", root_path.display());

    let root = LocalFolder::open(&root_path)
        .with_context(|| format!("Failed to open '{}'", root_path.display()))?;
    action.run(&root, &LocalCopier, log)
}

/// Print the effective configuration
fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default configuration file
fn generate_config_file(output: Option<PathBuf>, log: &dyn Log) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => get_config_path().context("Could not determine configuration directory")?,
    };

    Config::write_default(&path)?;
    log_info!(log, "Configuration written to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::local::{LocalCopier, LocalFolder};
    use crate::testdb::{CaptureLog, MockCopier, MockFolder};
    use clap::Parser;
    use log::Level;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sync_action_logs_summary() {
        let out = TempDir::new().unwrap();
        let root = MockFolder::new("DCIM")
            .with_folder(MockFolder::new("100APPLE").with_bytes("IMG_0001.JPG", 1))
            .with_bytes("notes.txt", 1);
        let action = DeviceAction::Sync(SyncPolicy::new(out.path(), &[".jpg"], false));
        let copier = MockCopier::new();
        let log = CaptureLog::new();

        action.run(&root, &copier, &log).unwrap();

        assert_eq!(copier.calls().len(), 1);
        assert!(log.contains(Level::Info, "Sync complete: 1 copied, 0 failed, 1 skipped, 1 folders"));
    }

    #[test]
    fn test_list_action_fails_on_broken_folder() {
        let root = MockFolder::new("DCIM").with_folder(MockFolder::new("100APPLE").failing());
        let log = CaptureLog::new();

        let err = DeviceAction::List
            .run(&root, &MockCopier::new(), &log)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to list 'DCIM'"));
    }

    #[test]
    fn test_local_sync_end_to_end() {
        let device = TempDir::new().unwrap();
        fs::create_dir_all(device.path().join("100APPLE")).unwrap();
        fs::write(device.path().join("100APPLE").join("IMG_0001.JPG"), b"jpeg").unwrap();
        fs::write(device.path().join("100APPLE").join("IMG_0001.AAE"), b"xml").unwrap();
        fs::write(device.path().join("clip.MOV"), b"mov").unwrap();

        let out = TempDir::new().unwrap();
        let policy = SyncPolicy::new(out.path(), &[".jpg", ".mov"], false);
        let root = LocalFolder::open(device.path()).unwrap();
        let log = CaptureLog::new();

        DeviceAction::Sync(policy)
            .run(&root, &LocalCopier, &log)
            .unwrap();

        assert_eq!(
            fs::read(out.path().join("100APPLE").join("IMG_0001.JPG")).unwrap(),
            b"jpeg"
        );
        assert_eq!(fs::read(out.path().join("clip.MOV")).unwrap(), b"mov");
        assert!(!out.path().join("100APPLE").join("IMG_0001.AAE").exists());
    }

    // On Windows `--source` is bound through the shell instead
    #[cfg(not(windows))]
    #[test]
    fn test_run_command_with_source_dry_run() {
        let device = TempDir::new().unwrap();
        fs::write(device.path().join("IMG_0001.JPG"), b"jpeg").unwrap();
        let out = TempDir::new().unwrap();
        let local_dir = out.path().join("backup");

        let args = Args::try_parse_from([
            "mtp-photo-sync".to_string(),
            "sync".to_string(),
            "--source".to_string(),
            device.path().display().to_string(),
            "-d".to_string(),
            local_dir.display().to_string(),
            "--dry-run".to_string(),
        ])
        .unwrap();
        let log = CaptureLog::new();

        run_command(&args, &Config::default(), &log).unwrap();

        assert!(!local_dir.exists());
        assert!(log.contains(Level::Info, "DRY-RUN: Would copy"));
        assert!(log.contains(Level::Info, "DRY-RUN complete: 1 files would be copied"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_run_command_device_not_found_is_logged() {
        let namespace = TempDir::new().unwrap();
        fs::create_dir(namespace.path().join("Local Disk")).unwrap();

        let mut config = Config::default();
        config.device.namespace_root = Some(namespace.path().to_path_buf());
        let args = Args::try_parse_from(["mtp-photo-sync", "list"]).unwrap();
        let log = CaptureLog::new();

        let err = run_command(&args, &config, &log).unwrap_err();

        assert!(format!("{:?}", err).contains("No device matching 'Apple iPhone' found"));
        assert!(log.contains(Level::Error, "Failed to find the photo folder on the device"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_empty_file_types_warns_and_copies_nothing() {
        let device = TempDir::new().unwrap();
        fs::write(device.path().join("IMG_0001.JPG"), b"jpeg").unwrap();
        let out = TempDir::new().unwrap();

        let args = Args::try_parse_from([
            "mtp-photo-sync".to_string(),
            "sync".to_string(),
            "-s".to_string(),
            device.path().display().to_string(),
            "-d".to_string(),
            out.path().display().to_string(),
            "--file-types".to_string(),
        ])
        .unwrap();
        let log = CaptureLog::new();

        run_command(&args, &Config::default(), &log).unwrap();

        assert!(log.contains(Level::Warn, "No file types selected"));
        assert!(!out.path().join("IMG_0001.JPG").exists());
        assert!(log.contains(Level::Info, "Sync complete: 0 copied, 0 failed, 1 skipped, 0 folders"));
    }

    #[test]
    fn test_generate_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let log = CaptureLog::new();

        generate_config_file(Some(path.clone()), &log).unwrap();

        assert!(Config::load(&path).is_ok());
        assert!(log.contains(Level::Info, "Configuration written to"));
    }
}
