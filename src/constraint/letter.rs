//! Per-letter constraint descriptors

use crate::core::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Set of word positions, stored as a bitmask (bit `i` = position `i`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct PositionSet(u8);

impl PositionSet {
    /// Largest word length a position set can describe
    pub const MAX_POSITIONS: usize = u8::BITS as usize;

    pub const EMPTY: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Copy of this set with `position` added
    #[inline]
    #[must_use]
    pub const fn with(self, position: usize) -> Self {
        Self(self.0 | (1 << position))
    }

    #[inline]
    pub fn insert(&mut self, position: usize) {
        *self = self.with(position);
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, position: usize) -> bool {
        position < Self::MAX_POSITIONS && self.0 & (1 << position) != 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Positions in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..Self::MAX_POSITIONS).filter(move |&pos| self.contains(pos))
    }
}

impl From<PositionSet> for Vec<usize> {
    fn from(set: PositionSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<usize>> for PositionSet {
    type Error = String;

    fn try_from(positions: Vec<usize>) -> Result<Self, Self::Error> {
        positions.into_iter().try_fold(Self::EMPTY, |set, pos| {
            if pos < Self::MAX_POSITIONS {
                Ok(set.with(pos))
            } else {
                Err(format!("position {pos} out of range"))
            }
        })
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<usize> = self.iter().collect();
        write!(f, "{positions:?}")
    }
}

/// What is known about one letter of the answer
///
/// `frequency` is the exact occurrence count when `exact` is set and a lower
/// bound otherwise. Valid descriptors satisfy:
/// - `frequency == 0` implies `must` is empty and `exact` is set
/// - `must.len() <= frequency`
/// - `must` and `cant` are disjoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LetterConstraint {
    #[serde(rename = "must_be_in_positions")]
    pub must: PositionSet,
    #[serde(rename = "cant_be_in_positions")]
    pub cant: PositionSet,
    pub frequency: u8,
    #[serde(rename = "frequency_is_exact")]
    pub exact: bool,
}

impl LetterConstraint {
    /// The letter does not occur at all
    pub const ABSENT: Self = Self {
        must: PositionSet::EMPTY,
        cant: PositionSet::EMPTY,
        frequency: 0,
        exact: true,
    };

    /// Check the descriptor invariants
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::constraint::{LetterConstraint, PositionSet};
    ///
    /// let overlapping = LetterConstraint {
    ///     must: PositionSet::EMPTY.with(1),
    ///     cant: PositionSet::EMPTY.with(1),
    ///     frequency: 1,
    ///     exact: false,
    /// };
    /// assert!(!overlapping.is_valid());
    /// assert!(LetterConstraint::ABSENT.is_valid());
    /// ```
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        if self.frequency == 0 {
            return self.must.is_empty() && self.exact;
        }
        self.must.len() <= self.frequency as usize && !self.must.intersects(self.cant)
    }

    /// Check that every referenced position exists in a word of `word_length`
    #[must_use]
    pub fn fits(&self, word_length: usize) -> bool {
        self.must.iter().chain(self.cant.iter()).all(|pos| pos < word_length)
    }

    #[inline]
    #[must_use]
    pub const fn in_target(&self) -> bool {
        self.frequency > 0
    }

    /// Positions not ruled out for this letter
    #[must_use]
    pub fn possible_positions(&self, word_length: usize) -> PositionSet {
        (0..word_length)
            .filter(|&pos| !self.cant.contains(pos))
            .fold(PositionSet::EMPTY, PositionSet::with)
    }

    /// Test a word against this descriptor for `letter`
    #[must_use]
    pub fn satisfied_by(&self, word: &Word, letter: u8) -> bool {
        let count = word.count_of(letter);
        let frequency = usize::from(self.frequency);
        let count_ok = if self.exact {
            count == frequency
        } else {
            count >= frequency
        };

        count_ok
            && self.must.iter().all(|pos| word.char_at(pos) == letter)
            && self.cant.iter().all(|pos| word.char_at(pos) != letter)
    }
}

impl fmt::Display for LetterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_target() {
            return write!(f, "not in target word");
        }
        if self.exact {
            write!(f, "appears {} times", self.frequency)?;
        } else {
            write!(f, "appears at least {} times", self.frequency)?;
        }
        if !self.must.is_empty() {
            write!(f, " | must be in positions: {}", self.must)?;
        }
        if !self.cant.is_empty() {
            write!(f, " | can't be in positions: {}", self.cant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(list: &[usize]) -> PositionSet {
        list.iter().fold(PositionSet::EMPTY, |set, &pos| set.with(pos))
    }

    #[test]
    fn position_set_basics() {
        let set = positions(&[0, 3]);
        assert_eq!(set.bits(), 0b1001);
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(1));
        assert!(!set.contains(42));
        assert_eq!(set.iter().collect::<Vec<_>>(), [0, 3]);
        assert!(set.intersects(positions(&[3, 4])));
        assert!(!set.intersects(positions(&[1, 2])));
        assert_eq!(set.to_string(), "[0, 3]");
    }

    #[test]
    fn validity_rules() {
        let zero_inexact = LetterConstraint {
            exact: false,
            ..LetterConstraint::ABSENT
        };
        assert!(!zero_inexact.is_valid());

        let too_many_musts = LetterConstraint {
            must: positions(&[0, 1]),
            cant: PositionSet::EMPTY,
            frequency: 1,
            exact: true,
        };
        assert!(!too_many_musts.is_valid());

        let ok = LetterConstraint {
            must: positions(&[0]),
            cant: positions(&[2, 4]),
            frequency: 2,
            exact: false,
        };
        assert!(ok.is_valid());
        assert!(ok.fits(5));
        assert!(!ok.fits(4));
    }

    #[test]
    fn satisfied_by_checks_count_and_positions() {
        let at_least_two_e = LetterConstraint {
            must: positions(&[4]),
            cant: positions(&[0]),
            frequency: 2,
            exact: false,
        };
        assert!(at_least_two_e.satisfied_by(&Word::new("geese").unwrap(), b'e'));
        assert!(!at_least_two_e.satisfied_by(&Word::new("crane").unwrap(), b'e'));
        assert!(!at_least_two_e.satisfied_by(&Word::new("eerie").unwrap(), b'e'));

        let exactly_one = LetterConstraint {
            frequency: 1,
            exact: true,
            must: PositionSet::EMPTY,
            cant: positions(&[1]),
        };
        assert!(exactly_one.satisfied_by(&Word::new("abide").unwrap(), b'e'));
        assert!(!exactly_one.satisfied_by(&Word::new("speed").unwrap(), b'e'));

        assert!(LetterConstraint::ABSENT.satisfied_by(&Word::new("crane").unwrap(), b'z'));
        assert!(!LetterConstraint::ABSENT.satisfied_by(&Word::new("crane").unwrap(), b'c'));
    }

    #[test]
    fn possible_positions_excludes_cant() {
        let c = LetterConstraint {
            must: PositionSet::EMPTY,
            cant: positions(&[1, 3]),
            frequency: 1,
            exact: false,
        };
        assert_eq!(c.possible_positions(5), positions(&[0, 2, 4]));
    }

    #[test]
    fn display_matches_knowledge() {
        let c = LetterConstraint {
            must: positions(&[0]),
            cant: positions(&[3]),
            frequency: 2,
            exact: false,
        };
        assert_eq!(
            c.to_string(),
            "appears at least 2 times | must be in positions: [0] | can't be in positions: [3]"
        );
        assert_eq!(LetterConstraint::ABSENT.to_string(), "not in target word");
    }

    #[test]
    fn serializes_positions_as_lists() {
        let c = LetterConstraint {
            must: positions(&[1]),
            cant: positions(&[0, 4]),
            frequency: 1,
            exact: true,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            r#"{"must_be_in_positions":[1],"cant_be_in_positions":[0,4],"frequency":1,"frequency_is_exact":true}"#
        );
        let back: LetterConstraint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
