//! Scoring of guess sequences against the full answer set
//!
//! For each possible answer, the sequence's buckets are intersected in order.
//! Once the running set holds at most [`SOLVED_THRESHOLD`] answers before a
//! further guess, the answer counts as 1: two candidates are told apart by
//! the next move.

use crate::core::CandidateSet;
use crate::index::CandidateIndex;
use std::borrow::Cow;
use std::fmt;

/// Candidate count at which further guesses are skipped
pub const SOLVED_THRESHOLD: usize = 2;

/// How remaining-candidate counts are aggregated over answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Mean remaining candidates
    #[default]
    Average,
    /// Largest remaining candidate count
    WorstCase,
}

impl Metric {
    /// Score `guesses` (indices into the guess vocabulary); lower is better
    ///
    /// Returns `f64::INFINITY` when there are no answers.
    ///
    /// # Examples
    /// ```
    /// use indicatif::ProgressBar;
    /// use wordle_bitset::core::Word;
    /// use wordle_bitset::index::CandidateIndex;
    /// use wordle_bitset::search::Metric;
    ///
    /// let words: Vec<Word> = ["crane", "slate", "crate"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let index = CandidateIndex::build(&words, &words, &ProgressBar::hidden());
    ///
    /// // "crane" tells all three apart
    /// assert_eq!(Metric::WorstCase.score(&index, &[0]), 1.0);
    /// ```
    #[must_use]
    pub fn score(self, index: &CandidateIndex, guesses: &[usize]) -> f64 {
        match self {
            Self::Average => average_remaining(index, guesses),
            Self::WorstCase => worst_case_remaining(index, guesses).map_or(f64::INFINITY, |n| n as f64),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::WorstCase => "worst-case",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidates left for one answer after playing `guesses` in order
///
/// An empty sequence leaves every answer.
#[must_use]
pub fn remaining_after(index: &CandidateIndex, guesses: &[usize], answer: usize) -> usize {
    let Some((&first, rest)) = guesses.split_first() else {
        return index.answers().len();
    };

    let mut current: Cow<'_, CandidateSet> = Cow::Borrowed(index.lookup(first, answer));
    for (step, &guess) in rest.iter().enumerate() {
        if current.len() <= SOLVED_THRESHOLD {
            return 1;
        }
        let bucket = index.lookup(guess, answer);
        if step + 1 == rest.len() {
            return current.intersection_len(bucket);
        }
        current = Cow::Owned(current.intersect(bucket));
    }
    current.len()
}

/// Mean of [`remaining_after`] over every answer
#[must_use]
pub fn average_remaining(index: &CandidateIndex, guesses: &[usize]) -> f64 {
    let answers = index.answers().len();
    if answers == 0 {
        return f64::INFINITY;
    }
    let total: usize = (0..answers)
        .map(|answer| remaining_after(index, guesses, answer))
        .sum();
    total as f64 / answers as f64
}

/// Maximum of [`remaining_after`] over every answer, `None` without answers
#[must_use]
pub fn worst_case_remaining(index: &CandidateIndex, guesses: &[usize]) -> Option<usize> {
    (0..index.answers().len())
        .map(|answer| remaining_after(index, guesses, answer))
        .max()
}
