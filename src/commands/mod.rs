//! Command implementations

pub mod precompute;
pub mod search;
pub mod verify;

pub use precompute::{PrecomputeConfig, PrecomputeSummary, run_precompute};
pub use search::{GuessSummary, SequenceScore, find_best_guess, find_best_pair, score_guesses};
pub use verify::{Mismatch, VerifyConfig, VerifyReport, run_verify};
