//! Photo-storage discovery in the shell namespace
//!
//! The namespace is enumerated once. The first item whose display name
//! contains the vendor marker is taken as the phone, and the configured
//! sub-path (normally `Internal Storage/DCIM`) is appended to its parsing
//! path.

use crate::core::error::{Result, SyncError};
use crate::core::logging::{log_debug, log_info};
use crate::device::traits::ShellNamespaceTrait;
use log::Log;
use std::path::PathBuf;

/// Find the photo-storage path of the first matching device
///
/// Returns `Ok(None)` when no item matches; enumeration failures are errors.
pub fn find_photo_root<N, S>(
    namespace: &N,
    vendor_marker: &str,
    subpath: &[S],
    log: &dyn Log,
) -> Result<Option<PathBuf>>
where
    N: ShellNamespaceTrait,
    S: AsRef<str>,
{
    log_info!(log, "Searching the shell namespace for '{}'", vendor_marker);

    for item in namespace.items()? {
        log_debug!(log, "Found namespace item: {}", item.display_name);
        if item.display_name.contains(vendor_marker) {
            log_info!(
                log,
                "Found device '{}' at {}",
                item.display_name,
                item.parsing_path.display()
            );
            let mut path = item.parsing_path;
            for component in subpath {
                path.push(component.as_ref());
            }
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Like [`find_photo_root`], but a missing device is a [`SyncError::DeviceNotFound`]
pub fn require_photo_root<N, S>(
    namespace: &N,
    vendor_marker: &str,
    subpath: &[S],
    log: &dyn Log,
) -> Result<PathBuf>
where
    N: ShellNamespaceTrait,
    S: AsRef<str>,
{
    find_photo_root(namespace, vendor_marker, subpath, log)?
        .ok_or_else(|| SyncError::DeviceNotFound(vendor_marker.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdb::{CaptureLog, MockNamespace};
    use std::path::Path;

    const SUBPATH: [&str; 2] = ["Internal Storage", "DCIM"];

    #[test]
    fn test_returns_first_matching_item() {
        let namespace = MockNamespace::new()
            .with_item("Local Disk (C:)", "C:")
            .with_item("Apple iPhone", "phone-one")
            .with_item("Apple iPhone (2)", "phone-two");

        let log = CaptureLog::new();
        let path = find_photo_root(&namespace, "Apple iPhone", &SUBPATH, &log)
            .unwrap()
            .unwrap();

        assert_eq!(
            path,
            Path::new("phone-one").join("Internal Storage").join("DCIM")
        );
    }

    #[test]
    fn test_marker_matches_substring() {
        let namespace = MockNamespace::new().with_item("John's Apple iPhone 15", "phone");

        let log = CaptureLog::new();
        let path = find_photo_root(&namespace, "Apple iPhone", &SUBPATH, &log).unwrap();
        assert!(path.is_some());
    }

    #[test]
    fn test_no_match_is_none() {
        let namespace = MockNamespace::new()
            .with_item("Local Disk (C:)", "C:")
            .with_item("apple iphone", "lowercase-does-not-match");

        let log = CaptureLog::new();
        assert_eq!(
            find_photo_root(&namespace, "Apple iPhone", &SUBPATH, &log).unwrap(),
            None
        );
    }

    #[test]
    fn test_empty_namespace_is_device_not_found() {
        let log = CaptureLog::new();
        let err = require_photo_root(&MockNamespace::new(), "Apple iPhone", &SUBPATH, &log)
            .unwrap_err();

        assert!(matches!(err, SyncError::DeviceNotFound(ref marker) if marker == "Apple iPhone"));
    }

    #[test]
    fn test_enumeration_failure_is_an_error() {
        let log = CaptureLog::new();
        let err = find_photo_root(&MockNamespace::new().failing(), "Apple iPhone", &SUBPATH, &log)
            .unwrap_err();

        assert!(matches!(err, SyncError::Enumeration { .. }));
    }

    #[test]
    fn test_empty_subpath_returns_device_path() {
        let namespace = MockNamespace::new().with_item("Apple iPhone", "phone");
        let log = CaptureLog::new();
        let no_subpath: [&str; 0] = [];

        let path = require_photo_root(&namespace, "Apple iPhone", &no_subpath, &log).unwrap();
        assert_eq!(path, PathBuf::from("phone"));
    }
}
