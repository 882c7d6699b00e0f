//! Plain filesystem adapter
//!
//! Used when the photo storage is reachable as an ordinary directory: an
//! explicit `--source` path, or a phone mounted by the desktop (for example
//! under `$XDG_RUNTIME_DIR/gvfs` on Linux).

use crate::core::error::{Result, SyncError};
use crate::device::traits::{
    CopyOutcome, FolderEntry, ItemCopierTrait, NamespaceItem, ShellFolderTrait,
    ShellNamespaceTrait,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory on a mounted filesystem
#[derive(Debug, Clone)]
pub struct LocalFolder {
    path: PathBuf,
}

impl LocalFolder {
    /// Open a directory, failing if it is not one
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(SyncError::Bind {
                parent: path
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self { path })
    }
}

impl ShellFolderTrait for LocalFolder {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    /// Entries are sorted by name so runs are reproducible
    fn entries(&self) -> Result<Vec<FolderEntry>> {
        let to_error = |e: std::io::Error| SyncError::Enumeration {
            location: self.location(),
            message: e.to_string(),
        };

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.path).map_err(to_error)? {
            let dir_entry = dir_entry.map_err(to_error)?;
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let is_folder = dir_entry.file_type().map_err(to_error)?.is_dir();
            entries.push(FolderEntry { name, is_folder });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn open_subfolder(&self, name: &str) -> Result<Self> {
        let path = self.path.join(name);
        if !path.is_dir() {
            return Err(SyncError::Bind {
                parent: self.location(),
                name: name.to_string(),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self { path })
    }

    fn displayed_size(&self, name: &str) -> Result<Option<String>> {
        let metadata = fs::metadata(self.path.join(name)).map_err(|e| SyncError::Property {
            location: self.location(),
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(metadata.len().to_string()))
    }

    fn item_path(&self, name: &str) -> Result<String> {
        Ok(self.path.join(name).display().to_string())
    }
}

/// A namespace made of the entries of one directory
///
/// Each subdirectory is an item whose display name is its file name.
#[derive(Debug, Clone)]
pub struct DirectoryNamespace {
    root: PathBuf,
}

impl DirectoryNamespace {
    /// Create a namespace over `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ShellNamespaceTrait for DirectoryNamespace {
    fn items(&self) -> Result<Vec<NamespaceItem>> {
        let to_error = |e: std::io::Error| SyncError::Enumeration {
            location: self.root.display().to_string(),
            message: e.to_string(),
        };

        let mut items = Vec::new();
        for dir_entry in fs::read_dir(&self.root).map_err(to_error)? {
            let dir_entry = dir_entry.map_err(to_error)?;
            if dir_entry.file_type().map_err(to_error)?.is_dir() {
                let name = dir_entry.file_name().to_string_lossy().into_owned();
                items.push(NamespaceItem::new(&name, dir_entry.path()));
            }
        }

        items.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(items)
    }
}

/// Copies with [`std::fs::copy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCopier;

impl ItemCopierTrait for LocalCopier {
    fn copy_item(&self, source: &str, dest: &Path) -> CopyOutcome {
        match fs::copy(source, dest) {
            Ok(_) => CopyOutcome::success(),
            Err(e) => CopyOutcome::failed(e.raw_os_error().unwrap_or(-1)),
        }
    }
}
