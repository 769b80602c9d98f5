//! Progress bars for long scans

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} {prefix:>10} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}";

/// A progress bar labelled `prefix`, or a hidden one when `quiet`
///
/// The length is set by whichever scan drives the bar.
#[must_use]
pub fn progress_bar(prefix: &'static str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░"));
    ProgressBar::new(0).with_style(style).with_prefix(prefix)
}
