//! Recursive folder size aggregation

use crate::core::error::{Result, SyncError};
use crate::core::logging::{log_debug, log_error};
use crate::core::size::parse_size;
use crate::device::traits::ShellFolderTrait;
use log::Log;

/// Total bytes of all files in `folder` and its descendants
///
/// File sizes come from the displayed size property; items without one, or
/// with an unparseable one, count as zero. An enumeration, bind or property
/// failure is logged once, with the location of the folder it occurred in,
/// and returned unchanged.
pub fn folder_size<F: ShellFolderTrait>(folder: &F, log: &dyn Log) -> Result<u64> {
    let logged = |e: SyncError| {
        log_error!(log, "Failed to calculate size of '{}': {}", folder.location(), e);
        e
    };
    let mut total: u64 = 0;

    for entry in folder.entries().map_err(logged)? {
        if entry.is_folder {
            let subfolder = folder.open_subfolder(&entry.name).map_err(logged)?;
            total = total.saturating_add(folder_size(&subfolder, log)?);
        } else if let Some(size_text) = folder.displayed_size(&entry.name).map_err(logged)? {
            total = total.saturating_add(parse_size(&size_text));
        }
    }

    log_debug!(log, "'{}' totals {} bytes", folder.location(), total);
    Ok(total)
}
