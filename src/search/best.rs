//! Running best result shared between search workers

use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};

/// A scored guess sequence
///
/// Ordered by score, then by guess indices, so that ties resolve to the
/// lexicographically smallest sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub score: f64,
    pub guesses: Vec<usize>,
}

impl Ranked {
    #[must_use]
    pub const fn new(score: f64, guesses: Vec<usize>) -> Self {
        Self { score, guesses }
    }

    /// Whether `self` should replace `other` as the best result
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Less
    }

    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.guesses.cmp(&other.guesses))
    }

    /// Keep the better of `self` and `other`
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if other.beats(&self) { other } else { self }
    }
}

/// Mutex-guarded best result
///
/// `offer` performs the read-compare-write under one lock, so concurrent
/// workers never lose an improvement.
#[derive(Debug, Default)]
pub struct SharedBest {
    best: Mutex<Option<Ranked>>,
}

impl SharedBest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current best if `candidate` ranks strictly better
    ///
    /// Returns `true` if the candidate was kept.
    pub fn offer(&self, candidate: Ranked) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        match best.as_ref() {
            Some(current) if !candidate.beats(current) => false,
            _ => {
                *best = Some(candidate);
                true
            }
        }
    }

    /// Copy of the current best
    #[must_use]
    pub fn snapshot(&self) -> Option<Ranked> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn into_inner(self) -> Option<Ranked> {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
