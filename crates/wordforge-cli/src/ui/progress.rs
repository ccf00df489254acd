//! Progress indicators.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use wordforge_core::Progress;

/// Create the generation progress bar, hidden when `silent`.
///
/// The bar starts as a spinner while seeds are collected and gains a length
/// once the first estimate is known.
pub fn bar(silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_message("collecting seeds");
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Reflect one pipeline progress report on `pb`.
pub fn update(pb: &ProgressBar, progress: &Progress) {
    pb.set_length(progress.estimated.max(progress.current as u64));
    pb.set_position(progress.current as u64);
    pb.set_message(progress.stage.to_string());
}
