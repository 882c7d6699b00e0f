//! Device interaction module
//!
//! # Submodules
//!
//! - `traits` - The directory capability the core algorithms depend on
//! - `local` - Plain filesystem adapter (all platforms)
//! - `shell` - Windows shell namespace adapter (Windows only)
//!
//! Both adapters and the mocks in [`crate::testdb`] implement the same
//! traits, so listing and syncing work the same against any of them.

pub mod local;
#[cfg(windows)]
pub mod shell;
pub mod traits;

pub use local::{DirectoryNamespace, LocalCopier, LocalFolder};
#[cfg(windows)]
pub use shell::{initialize_com, ComGuard, ShellCopier, ShellFolder, ShellNamespace};
pub use traits::{
    CopyOutcome, FolderEntry, ItemCopierTrait, NamespaceItem, ShellFolderTrait,
    ShellNamespaceTrait,
};
