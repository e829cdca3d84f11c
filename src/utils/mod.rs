use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

/// Rough bounds, in seconds, for parsing `files` recordings
pub fn estimated_seconds(files: usize) -> (usize, usize) {
    (files.saturating_sub(2), files + 4)
}

/// Human-readable duration, e.g. `1.234s` or `56ms`
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.3}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

/// Progress bar over `len` items, or a hidden one when `visible` is false
pub fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => progress.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("Invalid progress template: {}", e),
    }
    progress.set_message("Parsing recordings");
    progress
}
