//! Exhaustive search for the most informative opening guesses
//!
//! Scores are computed purely from the candidate index, so a search gives
//! the same answer on any executor and any thread count.

mod best;
mod engine;
mod executor;
mod metric;

pub use best::{Ranked, SharedBest};
pub use engine::{SearchEngine, SearchResult};
pub use executor::{Executor, Parallel, Sequential};
pub use metric::{Metric, SOLVED_THRESHOLD, average_remaining, remaining_after, worst_case_remaining};
