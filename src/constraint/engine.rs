//! Candidate filtering
//!
//! The bitset path narrows an accumulated candidate set with one index
//! bucket per observed (guess, feedback). `cross_check` runs the bitset,
//! structural and precomputed-database paths side by side.

use super::analysis::ConstraintSet;
use super::database::ConstraintDatabase;
use crate::core::{CandidateSet, Feedback};
use crate::index::CandidateIndex;

/// Narrow `accumulated` by the answers producing `feedback` against `guess`
///
/// A feedback no answer produces yields an empty set.
#[must_use]
pub fn filter(
    index: &CandidateIndex,
    accumulated: &CandidateSet,
    guess: usize,
    feedback: Feedback,
) -> CandidateSet {
    index.bucket(guess, feedback).map_or_else(
        || CandidateSet::new(index.answers().len()),
        |bucket| accumulated.intersect(bucket),
    )
}

/// Candidates consistent with every `(guess, feedback)` observation
///
/// # Examples
/// ```
/// use indicatif::ProgressBar;
/// use wordle_bitset::constraint::apply_history;
/// use wordle_bitset::core::{Feedback, Word};
/// use wordle_bitset::index::CandidateIndex;
///
/// let words: Vec<Word> = ["crane", "slate", "crate", "irate"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
/// let index = CandidateIndex::build(&words, &words, &ProgressBar::hidden());
///
/// let feedback = Feedback::calculate(&words[0], &words[2]);
/// let remaining = apply_history(&index, &[(0, feedback)]);
/// assert_eq!(remaining.iter().collect::<Vec<_>>(), vec![2]);
/// ```
#[must_use]
pub fn apply_history(index: &CandidateIndex, history: &[(usize, Feedback)]) -> CandidateSet {
    history
        .iter()
        .fold(index.answer_set().clone(), |current, &(guess, feedback)| {
            filter(index, &current, guess, feedback)
        })
}

/// Outcome of filtering one (guess, answer) observation three ways
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCheck {
    pub guess: usize,
    pub answer: usize,
    pub feedback: Feedback,
    pub bitset: CandidateSet,
    pub structural: CandidateSet,
    pub database: Option<CandidateSet>,
}

impl CrossCheck {
    /// All evaluated paths produced the same candidate set
    #[must_use]
    pub fn agrees(&self) -> bool {
        self.bitset == self.structural && self.database.as_ref().is_none_or(|db| *db == self.bitset)
    }
}

/// Filter the full answer set by `guess` against `answer` on every path
///
/// `database` must have been built over the index's answer vocabulary.
#[must_use]
pub fn cross_check(
    index: &CandidateIndex,
    database: Option<&ConstraintDatabase>,
    guess: usize,
    answer: usize,
) -> CrossCheck {
    let feedback = index.feedback(guess, answer);
    let bitset = filter(index, index.answer_set(), guess, feedback);
    let constraints = ConstraintSet::from_feedback(&index.guesses()[guess], feedback);
    let structural = constraints.matching(index.answers());
    let database = database.map(|db| db.filter(&constraints));

    CrossCheck {
        guess,
        answer,
        feedback,
        bitset,
        structural,
        database,
    }
}
