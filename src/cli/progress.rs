//! Progress display for CLI output
//!
//! Measuring a folder on a phone can take minutes, so `list` shows a
//! spinner that is updated each time a top-level folder has been measured.

use crate::core::size::format_size;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Get the spinner style for scanning operations
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷")
}

/// Spinner shown while folder sizes are being calculated
pub struct FolderSizeSpinner {
    spinner: ProgressBar,
    start_time: Instant,
    folders_done: usize,
}

impl FolderSizeSpinner {
    /// Create and start a spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Calculating folder sizes...");

        Self {
            spinner,
            start_time: Instant::now(),
            folders_done: 0,
        }
    }

    /// Record that one folder has been measured
    pub fn folder_done(&mut self, name: &str, bytes: u64) {
        self.folders_done += 1;
        self.spinner.set_message(format!(
            "{} folders measured, last: {} ({}) - {}s elapsed",
            self.folders_done,
            name,
            format_size(bytes),
            self.start_time.elapsed().as_secs()
        ));
    }

    /// Finish and clear the progress display
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for FolderSizeSpinner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_size_spinner_counts() {
        let mut spinner = FolderSizeSpinner::new();
        spinner.folder_done("100APPLE", 2048);
        spinner.folder_done("101APPLE", 10);
        assert_eq!(spinner.folders_done, 2);
        spinner.finish();
    }
}
