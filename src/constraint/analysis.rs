//! Structural feedback analysis
//!
//! Turns a (guess, feedback) observation into one `LetterConstraint` per
//! distinct guess letter and evaluates words against them by direct letter
//! counting. This path never touches the candidate index and serves as an
//! independent reference for the bitset filters.

use super::letter::{LetterConstraint, PositionSet};
use crate::core::{CandidateSet, Feedback, Tag, WORD_LENGTH, Word};
use std::fmt;

/// Per-letter knowledge implied by one observed feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Sorted by letter, one entry per distinct guess letter
    entries: Vec<(u8, LetterConstraint)>,
}

impl ConstraintSet {
    /// Derive the constraints a feedback implies
    ///
    /// For each distinct letter of the guess: Correct positions become
    /// `must`, its other positions become `cant`, the frequency is the number
    /// of Correct and Present tags, and it is exact as soon as one of the
    /// letter's positions is Absent. A letter with no Correct or Present tag
    /// is recorded as absent from the answer.
    ///
    /// A word satisfies the result exactly when it yields `feedback` for
    /// `guess`.
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::constraint::ConstraintSet;
    /// use wordle_bitset::core::{Feedback, Word};
    ///
    /// let guess = Word::new("speed").unwrap();
    /// let answer = Word::new("abide").unwrap();
    /// let set = ConstraintSet::from_feedback(&guess, Feedback::calculate(&guess, &answer));
    ///
    /// let e = set.get(b'e').unwrap();
    /// assert_eq!((e.frequency, e.exact), (1, true));
    /// assert!(set.satisfied_by(&answer));
    /// ```
    #[must_use]
    pub fn from_feedback(guess: &Word, feedback: Feedback) -> Self {
        let tags = feedback.tags();
        let mut entries: Vec<(u8, LetterConstraint)> = Vec::with_capacity(WORD_LENGTH);

        for letter in distinct_letters(guess) {
            let mut must = PositionSet::EMPTY;
            let mut cant = PositionSet::EMPTY;
            let mut frequency = 0u8;
            let mut exact = false;

            for (pos, &tag) in tags.iter().enumerate() {
                if guess.char_at(pos) != letter {
                    continue;
                }
                match tag {
                    Tag::Correct => {
                        must.insert(pos);
                        frequency += 1;
                    }
                    Tag::Present => {
                        cant.insert(pos);
                        frequency += 1;
                    }
                    Tag::Absent => {
                        cant.insert(pos);
                        exact = true;
                    }
                }
            }

            let constraint = if frequency == 0 {
                LetterConstraint::ABSENT
            } else {
                LetterConstraint {
                    must,
                    cant,
                    frequency,
                    exact,
                }
            };
            entries.push((letter, constraint));
        }

        Self { entries }
    }

    /// Constraints implied by guessing `guess` when the answer is `answer`
    #[must_use]
    pub fn from_answer(guess: &Word, answer: &Word) -> Self {
        Self::from_feedback(guess, Feedback::calculate(guess, answer))
    }

    /// Constraint recorded for `letter`, if the guess contained it
    #[must_use]
    pub fn get(&self, letter: u8) -> Option<&LetterConstraint> {
        self.entries
            .binary_search_by_key(&letter, |&(l, _)| l)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Iterate `(letter, constraint)` pairs in letter order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &LetterConstraint)> {
        self.entries.iter().map(|(letter, c)| (*letter, c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check a word against every letter constraint
    #[must_use]
    pub fn satisfied_by(&self, word: &Word) -> bool {
        self.entries
            .iter()
            .all(|(letter, constraint)| constraint.satisfied_by(word, *letter))
    }

    /// Words from `candidates` that satisfy every constraint
    #[must_use]
    pub fn filter<'a>(&self, candidates: &'a [Word]) -> Vec<&'a Word> {
        candidates.iter().filter(|w| self.satisfied_by(w)).collect()
    }

    /// Indices of satisfying words, as a bitset over `vocabulary`
    #[must_use]
    pub fn matching(&self, vocabulary: &[Word]) -> CandidateSet {
        CandidateSet::from_indices(
            vocabulary.len(),
            vocabulary
                .iter()
                .enumerate()
                .filter(|(_, word)| self.satisfied_by(word))
                .map(|(i, _)| i),
        )
    }
}

fn distinct_letters(word: &Word) -> Vec<u8> {
    let mut letters = word.chars().to_vec();
    letters.sort_unstable();
    letters.dedup();
    letters
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, constraint) in &self.entries {
            writeln!(f, "  {}: {constraint}", *letter as char)?;
        }
        Ok(())
    }
}
