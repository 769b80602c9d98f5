//! Formatting utilities for terminal output

use crate::core::Word;
use crate::search::Metric;

/// Create a bar string filled in proportion to `value / max`
#[must_use]
pub fn create_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    // Cast is safe: ratio is clamped to [0, 1]
    let filled = ((ratio * width as f64).round() as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Words joined for display, e.g. `SALET + COURN`
#[must_use]
pub fn join_upper(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.text().to_uppercase())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// A score with the unit its metric implies
#[must_use]
pub fn format_score(score: f64, metric: Metric) -> String {
    if score.is_infinite() {
        return "n/a".to_string();
    }
    match metric {
        Metric::Average => format!("{score:.4} avg candidates"),
        Metric::WorstCase => format!("{score:.0} max candidates"),
    }
}

/// Byte counts as `12.3 KB`
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        format!("{kb:.2} KB")
    } else {
        format!("{:.2} MB", kb / 1024.0)
    }
}
