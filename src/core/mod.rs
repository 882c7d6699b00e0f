//! Core functionality module
//!
//! This module contains the business logic of the photo sync tool. All of
//! it is written against the directory capability traits in
//! [`crate::device::traits`], so it runs unchanged on a real device or on
//! the fakes in [`crate::testdb`].
//!
//! # Submodules
//!
//! - `config` - Configuration loading and defaults
//! - `error` - Error types and result aliases
//! - `logging` - Logger construction and injected-logger macros
//! - `size` - Size string parsing and formatting
//! - `aggregate` - Recursive folder size aggregation
//! - `lister` - Per-folder size report
//! - `sync` - Recursive mirroring with dry-run support
//! - `locator` - Device discovery in the shell namespace

pub mod config;
pub mod error;
pub mod logging;

pub mod aggregate;
pub mod lister;
pub mod locator;
pub mod size;
pub mod sync;
