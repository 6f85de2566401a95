//! Progress display for dependency checks
//!
//! The checker reports progress as plain completed/total counts
//! through the `ProgressSink` trait; this module provides the
//! indicatif-backed spinner used by the CLI and a no-op sink for
//! quiet mode and tests.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Receiver for completed/total progress counts
///
/// Methods take `&self` since batch tasks report completion from
/// multiple tokio tasks.
pub trait ProgressSink: Send + Sync {
    /// A category check is starting
    fn begin(&self, total: usize, category: &str);

    /// One more package finished; counts are monotonic
    fn advance(&self, completed: usize, total: usize);

    /// The category check finished; clear any display
    fn finish(&self);
}

/// Spinner-based progress display
pub struct SpinnerProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    /// Create a new spinner progress display
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerProgress {
    fn begin(&self, total: usize, _category: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(format!("Checking {} packages...", total));
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.bar.lock().expect("progress mutex poisoned") = Some(spinner);
    }

    fn advance(&self, completed: usize, total: usize) {
        if let Some(ref bar) = *self.bar.lock().expect("progress mutex poisoned") {
            bar.set_message(format!(
                "Checking {} packages... ({}/{})",
                total, completed, total
            ));
        }
    }

    fn finish(&self) {
        let mut guard = self.bar.lock().expect("progress mutex poisoned");
        if let Some(ref bar) = *guard {
            bar.finish_and_clear();
        }
        *guard = None;
    }
}

/// Sink that discards all progress updates
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn begin(&self, _total: usize, _category: &str) {}
    fn advance(&self, _completed: usize, _total: usize) {}
    fn finish(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_progress_is_silent() {
        let progress = NullProgress;
        progress.begin(10, "Dependencies");
        progress.advance(1, 10);
        progress.finish();
    }

    #[test]
    fn test_spinner_lifecycle() {
        let progress = SpinnerProgress::new();
        progress.begin(3, "Dependencies");
        progress.advance(1, 3);
        progress.advance(2, 3);
        progress.advance(3, 3);
        progress.finish();
        // finishing twice is harmless
        progress.finish();
    }
}
