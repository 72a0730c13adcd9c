//! Progress indicator utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Patches smaller than this finish before a spinner would be visible
const SPINNER_THRESHOLD: usize = 1024 * 1024;

/// Run `work` behind a spinner when the input is large enough to notice
pub fn with_spinner<T>(message: &str, input_len: usize, work: impl FnOnce() -> T) -> T {
    if input_len < SPINNER_THRESHOLD {
        return work();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = work();
    spinner.finish_and_clear();
    result
}
