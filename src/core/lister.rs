//! Per-folder storage report for the photo-storage root

use crate::core::aggregate::folder_size;
use crate::core::error::Result;
use crate::core::logging::log_info;
use crate::core::size::format_size;
use crate::device::traits::ShellFolderTrait;
use log::Log;
use std::io::Write;

/// Aggregate size of one first-level folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReportEntry {
    /// Folder name
    pub name: String,
    /// Total bytes of all files below the folder
    pub total_bytes: u64,
}

/// First-level folders sorted by size, largest first
pub type SizeReport = Vec<SizeReportEntry>;

/// Compute the size of every first-level subfolder of `root`
///
/// Files directly under `root` are ignored. `on_folder` is called after each
/// folder has been measured. The result is sorted descending by size; folders
/// with equal sizes keep their enumeration order.
pub fn build_size_report<F, P>(root: &F, log: &dyn Log, mut on_folder: P) -> Result<SizeReport>
where
    F: ShellFolderTrait,
    P: FnMut(&str, u64),
{
    let mut report = SizeReport::new();

    for entry in root.entries()? {
        if !entry.is_folder {
            continue;
        }

        log_info!(log, "Calculating size of '{}'", entry.name);
        let subfolder = root.open_subfolder(&entry.name)?;
        let total_bytes = folder_size(&subfolder, log)?;
        log_info!(log, "'{}': {} bytes", entry.name, total_bytes);

        on_folder(&entry.name, total_bytes);
        report.push(SizeReportEntry {
            name: entry.name,
            total_bytes,
        });
    }

    report.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));
    Ok(report)
}

/// Write the report, one `name: size` line per folder
pub fn print_size_report<W: Write>(report: &[SizeReportEntry], out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Folders by size:")?;
    for entry in report {
        writeln!(out, "{}: {}", entry.name, format_size(entry.total_bytes))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdb::{CaptureLog, MockFolder};

    fn names(report: &[SizeReportEntry]) -> Vec<&str> {
        report.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_report_sorted_descending() {
        let root = MockFolder::new("DCIM")
            .with_folder(MockFolder::new("small").with_bytes("a.jpg", 10))
            .with_folder(MockFolder::new("large").with_file("b.mov", "2 GB"))
            .with_folder(MockFolder::new("medium").with_file("c.jpg", "3 MB"));

        let log = CaptureLog::new();
        let report = build_size_report(&root, &log, |_, _| {}).unwrap();

        assert_eq!(names(&report), vec!["large", "medium", "small"]);
        assert_eq!(report[0].total_bytes, 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_report_ties_keep_encounter_order() {
        let root = MockFolder::new("DCIM")
            .with_folder(MockFolder::new("first").with_bytes("a.jpg", 5))
            .with_folder(MockFolder::new("bigger").with_bytes("b.jpg", 50))
            .with_folder(MockFolder::new("second").with_bytes("c.jpg", 5))
            .with_folder(MockFolder::new("third").with_bytes("d.jpg", 5));

        let log = CaptureLog::new();
        let report = build_size_report(&root, &log, |_, _| {}).unwrap();

        assert_eq!(names(&report), vec!["bigger", "first", "second", "third"]);
    }

    #[test]
    fn test_report_ignores_top_level_files() {
        let root = MockFolder::new("DCIM")
            .with_bytes("loose.jpg", 999_999)
            .with_folder(MockFolder::new("100APPLE").with_bytes("a.jpg", 1));

        let log = CaptureLog::new();
        let report = build_size_report(&root, &log, |_, _| {}).unwrap();

        assert_eq!(names(&report), vec!["100APPLE"]);
    }

    #[test]
    fn test_progress_callback_sees_each_folder() {
        let root = MockFolder::new("DCIM")
            .with_folder(MockFolder::new("a").with_bytes("1.jpg", 1))
            .with_folder(MockFolder::new("b").with_bytes("2.jpg", 2));

        let log = CaptureLog::new();
        let mut seen = Vec::new();
        build_size_report(&root, &log, |name, bytes| seen.push((name.to_string(), bytes)))
            .unwrap();

        assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_report_fails_when_a_folder_fails() {
        let root = MockFolder::new("DCIM")
            .with_folder(MockFolder::new("ok").with_bytes("1.jpg", 1))
            .with_folder(MockFolder::new("broken").failing());

        let log = CaptureLog::new();
        assert!(build_size_report(&root, &log, |_, _| {}).is_err());
    }

    #[test]
    fn test_print_report_format() {
        let report = vec![
            SizeReportEntry {
                name: "100APPLE".to_string(),
                total_bytes: 11_010_048,
            },
            SizeReportEntry {
                name: "101APPLE".to_string(),
                total_bytes: 2048,
            },
            SizeReportEntry {
                name: "102APPLE".to_string(),
                total_bytes: 12,
            },
        ];

        let mut out = Vec::new();
        print_size_report(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\nFolders by size:\n100APPLE: 10.50 MB\n101APPLE: 2.00 KB\n102APPLE: 12 bytes\n"
        );
    }
}
