//! Letter constraints and candidate filtering
//!
//! Two interchangeable ways to narrow a candidate set:
//! - the bitset path, which intersects buckets of the candidate index
//! - the structural path, which checks per-letter constraints directly
//!
//! Both must agree on every input; `engine::cross_check` compares them.

mod analysis;
mod database;
mod engine;
mod enumerate;
mod letter;

pub use analysis::ConstraintSet;
pub use database::{ConstraintDatabase, ConstraintKey};
pub use engine::{CrossCheck, apply_history, cross_check, filter};
pub use enumerate::{DescriptorStats, EnumeratorConfig, enumerate};
pub use letter::{LetterConstraint, PositionSet};

use thiserror::Error;

/// Errors raised while building constraint data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("word length {0} is not supported (must be 1..=8)")]
    UnsupportedWordLength(usize),
}
