//! Mirror matching files from the device into a local directory tree
//!
//! The walk is depth-first. Each device folder maps to a local directory of
//! the same name under the destination. Only files whose extension is in
//! the policy's allowlist are copied. A file whose source path cannot be
//! resolved, or whose copy fails, is logged and counted as failed, and the
//! walk carries on with the next item.

use crate::core::config::normalize_file_types;
use crate::core::error::Result;
use crate::core::logging::{log_debug, log_error, log_info};
use crate::device::traits::{ItemCopierTrait, ShellFolderTrait};
use log::Log;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// What to mirror and where, fixed for one run
#[derive(Debug, Clone)]
pub struct SyncPolicy {
    /// Local directory that mirrors the photo-storage root
    pub local_root: PathBuf,
    /// Lowercase, dot-prefixed extensions to copy
    pub allowlist: BTreeSet<String>,
    /// Only log what would happen
    pub dry_run: bool,
}

impl SyncPolicy {
    /// Create a policy, normalizing the extension list
    pub fn new<S: AsRef<str>>(local_root: impl Into<PathBuf>, file_types: &[S], dry_run: bool) -> Self {
        Self {
            local_root: local_root.into(),
            allowlist: normalize_file_types(file_types),
            dry_run,
        }
    }

    /// Whether a file name's extension is in the allowlist (case-insensitive)
    pub fn allows(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| self.allowlist.contains(&ext.to_lowercase()))
    }
}

/// Counters for one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Folders visited below the root
    pub folders: usize,
    /// Files copied successfully
    pub copied: usize,
    /// Files that could not be resolved or copied
    pub failed: usize,
    /// Files that would have been copied (dry-run)
    pub planned: usize,
    /// Files skipped because of their extension
    pub skipped: usize,
}

impl SyncStats {
    /// One-line summary for the log
    pub fn summary(&self, dry_run: bool) -> String {
        if dry_run {
            format!(
                "DRY-RUN complete: {} files would be copied, {} skipped, {} folders",
                self.planned, self.skipped, self.folders
            )
        } else {
            format!(
                "Sync complete: {} copied, {} failed, {} skipped, {} folders",
                self.copied, self.failed, self.skipped, self.folders
            )
        }
    }
}

/// Recursive folder synchronizer
pub struct FolderSync<'a, C: ItemCopierTrait> {
    policy: &'a SyncPolicy,
    copier: &'a C,
    log: &'a dyn Log,
}

impl<'a, C: ItemCopierTrait> FolderSync<'a, C> {
    /// Create a synchronizer for one run
    pub fn new(policy: &'a SyncPolicy, copier: &'a C, log: &'a dyn Log) -> Self {
        Self {
            policy,
            copier,
            log,
        }
    }

    /// Mirror `root` into the policy's local root
    pub fn run<F: ShellFolderTrait>(&self, root: &F) -> Result<SyncStats> {
        let mut stats = SyncStats::default();
        log_info!(
            self.log,
            "Syncing '{}' into '{}'{}",
            root.location(),
            self.policy.local_root.display(),
            if self.policy.dry_run { " (dry-run)" } else { "" }
        );

        self.ensure_dir(&self.policy.local_root)?;
        self.sync_folder(root, &self.policy.local_root, &mut stats)?;
        Ok(stats)
    }

    fn sync_folder<F: ShellFolderTrait>(
        &self,
        folder: &F,
        local_dir: &Path,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let entries = folder.entries().map_err(|e| {
            log_error!(self.log, "Failed to enumerate '{}': {}", folder.location(), e);
            e
        })?;

        for entry in entries {
            if entry.is_folder {
                let subdir = local_dir.join(&entry.name);
                self.ensure_dir(&subdir)?;
                stats.folders += 1;

                let subfolder = folder.open_subfolder(&entry.name).map_err(|e| {
                    log_error!(self.log, "{}", e);
                    e
                })?;
                self.sync_folder(&subfolder, &subdir, stats)?;
                continue;
            }

            if !self.policy.allows(entry.extension().as_deref()) {
                stats.skipped += 1;
                continue;
            }

            let src_path = match folder.item_path(&entry.name) {
                Ok(path) => path,
                Err(e) => {
                    log_error!(
                        self.log,
                        "Failed to resolve {} in '{}': {}",
                        entry.name,
                        folder.location(),
                        e
                    );
                    stats.failed += 1;
                    continue;
                }
            };
            let dest_path = local_dir.join(&entry.name);

            if self.policy.dry_run {
                log_info!(
                    self.log,
                    "DRY-RUN: Would copy {} to {}",
                    src_path,
                    dest_path.display()
                );
                stats.planned += 1;
                continue;
            }

            let outcome = self.copier.copy_item(&src_path, &dest_path);
            if outcome.is_success() {
                log_info!(self.log, "Copied {} to {}", src_path, dest_path.display());
                stats.copied += 1;
            } else {
                log_error!(
                    self.log,
                    "Failed to copy {} (code {}{})",
                    src_path,
                    outcome.code,
                    if outcome.aborted { ", aborted" } else { "" }
                );
                stats.failed += 1;
            }
        }

        Ok(())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.policy.dry_run {
            log_debug!(self.log, "DRY-RUN: Would create {}", dir.display());
            return Ok(());
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                log_error!(self.log, "Failed to create '{}': {}", dir.display(), e);
                e
            })?;
            log_debug!(self.log, "Created {}", dir.display());
        }
        Ok(())
    }
}
