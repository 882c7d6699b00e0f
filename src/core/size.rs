//! Size string parsing and formatting
//!
//! The shell reports file sizes as display strings ("1,024", "10.5 MB",
//! "5 千字节"). [`parse_size`] turns them back into byte counts and
//! [`format_size`] renders byte counts for the size report.

use regex::Regex;
use std::sync::OnceLock;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Localized unit names and their two-letter equivalents.
///
/// Order matters: "千兆字节" contains "兆字节", so the longer token is tried first.
const LOCALIZED_UNITS: &[(&str, &str)] = &[
    ("太字节", "TB"),
    ("千兆字节", "GB"),
    ("兆字节", "MB"),
    ("千字节", "KB"),
];

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([\d.]+)\s*([TGMK]B)").expect("size pattern is a valid regex")
    })
}

fn unit_scale(unit: &str) -> u64 {
    match unit {
        "TB" => TB,
        "GB" => GB,
        "MB" => MB,
        _ => KB,
    }
}

/// Convert a displayed size string into a byte count
///
/// Unparseable input yields 0 rather than an error.
pub fn parse_size(text: &str) -> u64 {
    let mut text = text.trim().replace(',', "");

    if let Some((token, unit)) = LOCALIZED_UNITS.iter().find(|(token, _)| text.contains(token)) {
        text = text.replace(token, unit);
    }

    if let Some(caps) = size_pattern().captures(&text) {
        return match caps[1].parse::<f64>() {
            Ok(number) => (number * unit_scale(&caps[2]) as f64) as u64,
            Err(_) => 0,
        };
    }

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().unwrap_or(0);
    }

    0
}

/// Render a byte count in the largest unit whose value is at least 1
pub fn format_size(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
