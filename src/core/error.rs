//! Error types for the photo sync tool
//!
//! Per-file copy failures are reported through the log and the sync
//! statistics. Every variant here aborts the operation it occurs in.

use crate::core::config::ConfigError;
use thiserror::Error;

/// Main error type for the photo sync tool
#[derive(Error, Debug)]
pub enum SyncError {
    /// No namespace item matched the configured vendor marker
    #[error("No device matching '{0}' found. Make sure the phone is connected, unlocked and trusted.")]
    DeviceNotFound(String),

    /// Listing the contents of a folder failed
    #[error("Failed to enumerate '{location}': {message}")]
    Enumeration { location: String, message: String },

    /// Opening a child folder failed
    #[error("Failed to open folder '{name}' in '{parent}': {message}")]
    Bind {
        parent: String,
        name: String,
        message: String,
    },

    /// Reading the displayed size of an item failed
    #[error("Failed to read size of '{name}' in '{location}': {message}")]
    Property {
        location: String,
        name: String,
        message: String,
    },

    /// General I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration could not be loaded or written
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SyncError>;

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}
