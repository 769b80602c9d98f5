//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;
pub mod progress;

pub use display::{
    print_precompute_summary, print_search_result, print_sequence_score, print_verify_report,
};
pub use progress::progress_bar;
