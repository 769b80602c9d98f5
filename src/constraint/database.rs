//! Precomputed per-letter constraint bitsets
//!
//! For a vocabulary, stores one `CandidateSet` per (letter, descriptor) pair.
//! Filtering by a `ConstraintSet` then reduces to intersecting one stored
//! bitset per letter.

use super::analysis::ConstraintSet;
use super::letter::LetterConstraint;
use crate::core::{CandidateSet, Word};
use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Lookup key: a descriptor applied to a specific letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintKey {
    pub letter: u8,
    pub constraint: LetterConstraint,
}

/// Bitsets of every (letter, descriptor) pair over one vocabulary
pub struct ConstraintDatabase {
    words: Vec<Word>,
    bitsets: FxHashMap<ConstraintKey, CandidateSet>,
}

impl ConstraintDatabase {
    /// Evaluate every descriptor for every letter `a..=z` over `words`
    ///
    /// Letters are processed in parallel; `progress` advances once per letter.
    #[must_use]
    pub fn build(words: &[Word], descriptors: &[LetterConstraint], progress: &ProgressBar) -> Self {
        let bitsets: FxHashMap<ConstraintKey, CandidateSet> = (b'a'..=b'z')
            .into_par_iter()
            .flat_map_iter(|letter| {
                let column: Vec<_> = descriptors
                    .iter()
                    .map(|&constraint| {
                        let key = ConstraintKey { letter, constraint };
                        (key, evaluate(words, letter, &constraint))
                    })
                    .collect();
                progress.inc(1);
                column
            })
            .collect();

        debug!(
            "built {} constraint bitsets over {} words",
            bitsets.len(),
            words.len()
        );

        Self {
            words: words.to_vec(),
            bitsets,
        }
    }

    /// Stored bitset for a key
    #[must_use]
    pub fn get(&self, letter: u8, constraint: &LetterConstraint) -> Option<&CandidateSet> {
        self.bitsets.get(&ConstraintKey {
            letter,
            constraint: *constraint,
        })
    }

    /// Words satisfying every constraint of `set`
    ///
    /// Descriptors outside the precomputed space (e.g. a frequency above
    /// the enumeration cap) are evaluated on the spot.
    #[must_use]
    pub fn filter(&self, set: &ConstraintSet) -> CandidateSet {
        let mut result = CandidateSet::full(self.words.len());
        for (letter, constraint) in set.iter() {
            match self.get(letter, constraint) {
                Some(bitset) => result.intersect_with(bitset),
                None => result.intersect_with(&evaluate(&self.words, letter, constraint)),
            }
        }
        result
    }

    /// Number of stored bitsets
    #[must_use]
    pub fn len(&self) -> usize {
        self.bitsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitsets.is_empty()
    }

    /// Number of stored bitsets with at least one member
    #[must_use]
    pub fn non_empty(&self) -> usize {
        self.bitsets.values().filter(|b| !b.is_empty()).count()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

fn evaluate(words: &[Word], letter: u8, constraint: &LetterConstraint) -> CandidateSet {
    CandidateSet::from_indices(
        words.len(),
        words
            .iter()
            .enumerate()
            .filter(|(_, word)| constraint.satisfied_by(word, letter))
            .map(|(i, _)| i),
    )
}
