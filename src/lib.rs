//! MTP Photo Sync Library
//!
//! Lists and mirrors the photo storage of a phone that the operating system
//! exposes as a browsable folder (an MTP device under "This PC" on Windows,
//! or a mounted directory elsewhere).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration, errors, logging, size parsing, folder size
//!   aggregation, the size report, the sync algorithm and device discovery
//! - [`device`] - The directory capability traits and their platform adapters
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - In-memory folders, namespaces and copiers for testing
//!
//! The core algorithms never touch a platform API directly. They take a
//! folder, a copier and a logger as arguments:
//!
//! ```rust
//! use mtp_photo_sync::core::sync::{FolderSync, SyncPolicy};
//! use mtp_photo_sync::testdb::{CaptureLog, MockCopier, MockFolder};
//!
//! let dcim = MockFolder::new("DCIM")
//!     .with_folder(MockFolder::new("100APPLE").with_bytes("IMG_0001.JPG", 1024));
//! let policy = SyncPolicy::new("/tmp/backup", &[".jpg"], true);
//! let copier = MockCopier::new();
//! let log = CaptureLog::new();
//!
//! let stats = FolderSync::new(&policy, &copier, &log).run(&dcim).unwrap();
//! assert_eq!(stats.planned, 1);
//! assert!(copier.calls().is_empty());
//! ```
//!
//! # Platform Support
//!
//! On Windows the device is reached through the shell namespace and files are
//! copied with the shell's own copy engine. On other platforms the tool works
//! on a plain directory tree, such as a gvfs or ifuse mount.

pub mod cli;
pub mod core;
pub mod device;
pub mod testdb;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
