//! Mock device implementation for testing without a real device
//!
//! This module provides in-memory implementations of the directory
//! capability traits that simulate a phone's photo storage with a
//! configurable folder tree, namespace and copy behaviour.

use crate::core::error::{Result, SyncError};
use crate::device::traits::{
    CopyOutcome, FolderEntry, ItemCopierTrait, NamespaceItem, ShellFolderTrait,
    ShellNamespaceTrait,
};
use log::{Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Result code reported by [`MockCopier`] for simulated failures
pub const MOCK_COPY_FAILURE_CODE: i32 = 0x7C;

/// A child of a [`MockFolder`]
#[derive(Debug, Clone)]
pub enum MockNode {
    /// A nested folder
    Folder(MockFolder),
    /// A file with its displayed size text (if any)
    File { name: String, size: Option<String> },
}

impl MockNode {
    fn name(&self) -> &str {
        match self {
            MockNode::Folder(folder) => &folder.name,
            MockNode::File { name, .. } => name,
        }
    }
}

/// An in-memory folder tree
///
/// ```rust
/// use mtp_photo_sync::testdb::MockFolder;
///
/// let dcim = MockFolder::new("DCIM")
///     .with_folder(MockFolder::new("100APPLE").with_file("IMG_0001.JPG", "2.5 MB"))
///     .with_bytes("IMG_0002.PNG", 2048);
/// ```
#[derive(Debug, Clone)]
pub struct MockFolder {
    name: String,
    location: String,
    children: Vec<MockNode>,
    fail_enumeration: bool,
    unresolvable: Vec<String>,
}

impl MockFolder {
    /// Create an empty folder
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location: name.to_string(),
            children: Vec::new(),
            fail_enumeration: false,
            unresolvable: Vec::new(),
        }
    }

    /// Add a child folder
    pub fn with_folder(mut self, folder: MockFolder) -> Self {
        self.children.push(MockNode::Folder(folder));
        self
    }

    /// Add a file whose size property is displayed as `size`
    pub fn with_file(mut self, name: &str, size: &str) -> Self {
        self.children.push(MockNode::File {
            name: name.to_string(),
            size: Some(size.to_string()),
        });
        self
    }

    /// Add a file whose size property is a raw byte count
    pub fn with_bytes(self, name: &str, bytes: u64) -> Self {
        self.with_file(name, &bytes.to_string())
    }

    /// Add a file that has no size property
    pub fn with_unsized_file(mut self, name: &str) -> Self {
        self.children.push(MockNode::File {
            name: name.to_string(),
            size: None,
        });
        self
    }

    /// Make enumeration of this folder fail
    pub fn failing(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    /// Make resolving the copy source path of `name` fail
    pub fn with_unresolvable_path(mut self, name: &str) -> Self {
        self.unresolvable.push(name.to_string());
        self
    }

    fn child(&self, name: &str) -> Option<&MockNode> {
        self.children.iter().find(|child| child.name() == name)
    }
}

impl ShellFolderTrait for MockFolder {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn entries(&self) -> Result<Vec<FolderEntry>> {
        if self.fail_enumeration {
            return Err(SyncError::Enumeration {
                location: self.location.clone(),
                message: "simulated device disconnect".to_string(),
            });
        }

        Ok(self
            .children
            .iter()
            .map(|child| match child {
                MockNode::Folder(folder) => FolderEntry::folder(&folder.name),
                MockNode::File { name, .. } => FolderEntry::file(name),
            })
            .collect())
    }

    fn open_subfolder(&self, name: &str) -> Result<Self> {
        match self.child(name) {
            Some(MockNode::Folder(folder)) => {
                let mut folder = folder.clone();
                folder.location = format!("{}/{}", self.location, name);
                Ok(folder)
            }
            _ => Err(SyncError::Bind {
                parent: self.location.clone(),
                name: name.to_string(),
                message: "no such folder".to_string(),
            }),
        }
    }

    fn displayed_size(&self, name: &str) -> Result<Option<String>> {
        match self.child(name) {
            Some(MockNode::File { size, .. }) => Ok(size.clone()),
            _ => Err(SyncError::Property {
                location: self.location.clone(),
                name: name.to_string(),
                message: "no such file".to_string(),
            }),
        }
    }

    fn item_path(&self, name: &str) -> Result<String> {
        if self.unresolvable.iter().any(|n| n == name) {
            return Err(SyncError::Property {
                location: self.location.clone(),
                name: name.to_string(),
                message: "simulated parsing name failure".to_string(),
            });
        }
        Ok(format!("{}/{}", self.location, name))
    }
}

/// An in-memory shell namespace
#[derive(Debug, Clone, Default)]
pub struct MockNamespace {
    items: Vec<NamespaceItem>,
    fail: bool,
}

impl MockNamespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level item
    pub fn with_item(mut self, display_name: &str, parsing_path: &str) -> Self {
        self.items.push(NamespaceItem::new(display_name, parsing_path));
        self
    }

    /// Make enumeration of the namespace fail
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ShellNamespaceTrait for MockNamespace {
    fn items(&self) -> Result<Vec<NamespaceItem>> {
        if self.fail {
            return Err(SyncError::Enumeration {
                location: "namespace".to_string(),
                message: "simulated shell failure".to_string(),
            });
        }
        Ok(self.items.clone())
    }
}

/// A copier that records requests instead of copying
#[derive(Debug, Default)]
pub struct MockCopier {
    calls: RefCell<Vec<(String, PathBuf)>>,
    failing: Vec<String>,
}

impl MockCopier {
    /// Create a copier where every copy succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make copies of files with this name fail
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }

    /// All copy requests received so far, in order
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }

    /// Source paths of all copy requests, in order
    pub fn copied_sources(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(src, _)| src.clone()).collect()
    }
}

impl ItemCopierTrait for MockCopier {
    fn copy_item(&self, source: &str, dest: &Path) -> CopyOutcome {
        self.calls
            .borrow_mut()
            .push((source.to_string(), dest.to_path_buf()));

        let file_name = source.rsplit('/').next().unwrap_or(source);
        if self.failing.iter().any(|f| f == file_name) {
            CopyOutcome::failed(MOCK_COPY_FAILURE_CODE)
        } else {
            CopyOutcome::success()
        }
    }
}

/// A logger that keeps every record in memory
#[derive(Debug, Default)]
pub struct CaptureLog {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLog {
    /// Create an empty capture log
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at exactly `level`, in order
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, m)| m.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of messages logged at `level`
    pub fn count(&self, level: Level) -> usize {
        self.messages(level).len()
    }

    /// Whether any message at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }
}

impl Log for CaptureLog {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}
