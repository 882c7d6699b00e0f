//! Directory capability traits
//!
//! The traversal code in [`crate::core`] never touches a platform API
//! directly. It works against these traits, which are implemented by the
//! Windows shell adapter, the plain filesystem adapter and the in-memory
//! fakes in [`crate::testdb`].
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use mtp_photo_sync::device::traits::ShellFolderTrait;
//!
//! fn count_files<F: ShellFolderTrait>(folder: &F) -> mtp_photo_sync::core::error::Result<usize> {
//!     let mut count = 0;
//!     for entry in folder.entries()? {
//!         if entry.is_folder {
//!             count += count_files(&folder.open_subfolder(&entry.name)?)?;
//!         } else {
//!             count += 1;
//!         }
//!     }
//!     Ok(count)
//! }
//! ```

use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// One item inside a folder, as reported by a single enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Display name of the item within its parent
    pub name: String,
    /// Whether the item is a folder
    pub is_folder: bool,
}

impl FolderEntry {
    /// Create a folder entry
    pub fn folder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_folder: true,
        }
    }

    /// Create a file entry
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_folder: false,
        }
    }

    /// Lowercased final dotted suffix including the dot (`"IMG.JPG"` → `".jpg"`)
    ///
    /// Names without an extension, or dot-files such as `.hidden`, yield `None`.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
    }
}

/// A top-level item of the shell namespace (a drive, a phone, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceItem {
    /// Human-readable label (e.g. "Apple iPhone")
    pub display_name: String,
    /// Path the platform accepts to bind the item again
    pub parsing_path: PathBuf,
}

impl NamespaceItem {
    /// Create a new namespace item
    pub fn new(display_name: &str, parsing_path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.to_string(),
            parsing_path: parsing_path.into(),
        }
    }
}

/// Result of a single copy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Platform result code (0 on success)
    pub code: i32,
    /// Whether the operation was aborted before completing
    pub aborted: bool,
}

impl CopyOutcome {
    /// A successful copy
    pub fn success() -> Self {
        Self {
            code: 0,
            aborted: false,
        }
    }

    /// A failed copy with the given result code
    pub fn failed(code: i32) -> Self {
        Self {
            code,
            aborted: false,
        }
    }

    /// Check whether the copy completed
    pub fn is_success(&self) -> bool {
        self.code == 0 && !self.aborted
    }
}

/// Trait for browsing a folder on the device
///
/// A value of this type is a handle to one folder. Handles for children are
/// obtained with [`ShellFolderTrait::open_subfolder`] and are only valid
/// while the device stays connected.
pub trait ShellFolderTrait: Sized {
    /// Human-readable location of this folder, used for log context
    fn location(&self) -> String;

    /// Enumerate all items (folders and files) in this folder
    fn entries(&self) -> Result<Vec<FolderEntry>>;

    /// Open a child folder by the name returned from [`entries`](Self::entries)
    fn open_subfolder(&self, name: &str) -> Result<Self>;

    /// Read the displayed size property of a child file
    ///
    /// Returns `None` when the item has no size property.
    fn displayed_size(&self, name: &str) -> Result<Option<String>>;

    /// Path of a child item suitable as the source of a copy
    fn item_path(&self, name: &str) -> Result<String>;
}

/// Trait for listing the top-level namespace where devices appear
pub trait ShellNamespaceTrait {
    /// Enumerate the top-level items once
    fn items(&self) -> Result<Vec<NamespaceItem>>;
}

/// Trait for copying a single item to a local path
pub trait ItemCopierTrait {
    /// Copy `source` (as returned by [`ShellFolderTrait::item_path`]) to `dest`
    fn copy_item(&self, source: &str, dest: &Path) -> CopyOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_entry_constructors() {
        let folder = FolderEntry::folder("100APPLE");
        assert!(folder.is_folder);
        assert_eq!(folder.name, "100APPLE");

        let file = FolderEntry::file("IMG_0001.JPG");
        assert!(!file.is_folder);
    }

    #[test]
    fn test_extension_is_lowercased_final_suffix() {
        let cases = vec![
            ("IMG_0001.JPG", Some(".jpg")),
            ("clip.MoV", Some(".mov")),
            ("archive.tar.gz", Some(".gz")),
            ("noextension", None),
            (".hidden", None),
            ("trailing.", Some(".")),
        ];

        for (name, expected) in cases {
            assert_eq!(
                FolderEntry::file(name).extension(),
                expected.map(String::from),
                "Failed for: {}",
                name
            );
        }
    }

    #[test]
    fn test_copy_outcome() {
        assert!(CopyOutcome::success().is_success());
        assert!(!CopyOutcome::failed(2).is_success());

        let aborted = CopyOutcome {
            code: 0,
            aborted: true,
        };
        assert!(!aborted.is_success());
    }

    #[test]
    fn test_namespace_item() {
        let item = NamespaceItem::new("Apple iPhone", "/mnt/iphone");
        assert_eq!(item.display_name, "Apple iPhone");
        assert_eq!(item.parsing_path, PathBuf::from("/mnt/iphone"));
    }
}
