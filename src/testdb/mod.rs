//! Test doubles for running the tool without a connected device
//!
//! This module provides in-memory implementations of the directory
//! capability traits plus a capturing logger, so the traversal, listing
//! and sync logic can be exercised end to end without a phone.
//!
//! # Quick Start
//!
//! ```rust
//! use mtp_photo_sync::core::aggregate::folder_size;
//! use mtp_photo_sync::testdb::{CaptureLog, MockFolder};
//!
//! let dcim = MockFolder::new("DCIM")
//!     .with_folder(MockFolder::new("100APPLE").with_bytes("IMG_0001.JPG", 1024))
//!     .with_file("IMG_0002.PNG", "1 KB");
//!
//! let log = CaptureLog::new();
//! assert_eq!(folder_size(&dcim, &log).unwrap(), 2048);
//! ```

pub mod mock_device;

pub use mock_device::{
    CaptureLog, MockCopier, MockFolder, MockNamespace, MockNode, MOCK_COPY_FAILURE_CODE,
};
