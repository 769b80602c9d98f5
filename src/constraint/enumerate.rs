//! Exhaustive generation of letter-constraint descriptors
//!
//! Produces every valid `LetterConstraint` for a word length and frequency
//! cap. The result is independent of any word list, so it can be computed
//! once and paired with per-vocabulary bitsets later.

use super::letter::{LetterConstraint, PositionSet};
use super::ConstraintError;
use crate::core::{WORD_LENGTH, Word};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Shape of the descriptor space to enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratorConfig {
    pub word_length: usize,
    /// Highest frequency a descriptor may carry
    pub max_frequency: usize,
}

impl EnumeratorConfig {
    #[must_use]
    pub const fn new(word_length: usize, max_frequency: usize) -> Self {
        Self {
            word_length,
            max_frequency,
        }
    }

    /// Default cap for a word length: `ceil(L / 2)`, i.e. 3 for five letters
    #[must_use]
    pub const fn default_frequency_cap(word_length: usize) -> usize {
        word_length.div_ceil(2)
    }

    /// Cap the frequency at the highest letter multiplicity in `words`
    ///
    /// Feedback can never report more occurrences of a letter than the
    /// answer contains, so this bound is tight for an answer vocabulary.
    #[must_use]
    pub fn for_vocabulary(words: &[Word]) -> Self {
        let max_frequency = words
            .iter()
            .map(Word::max_multiplicity)
            .max()
            .unwrap_or(1)
            .max(1);
        Self::new(WORD_LENGTH, max_frequency)
    }
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self::new(WORD_LENGTH, Self::default_frequency_cap(WORD_LENGTH))
    }
}

/// Enumerate every valid descriptor
///
/// Order is deterministic: frequency, then inexact before exact, then the
/// `must` mask, then the `cant` mask, all ascending. Structurally equal
/// descriptors appear once.
///
/// # Errors
/// Returns `ConstraintError::UnsupportedWordLength` when the word length is
/// zero or exceeds [`PositionSet::MAX_POSITIONS`].
///
/// # Examples
/// ```
/// use wordle_bitset::constraint::{EnumeratorConfig, enumerate};
///
/// let all = enumerate(EnumeratorConfig::default()).unwrap();
/// assert_eq!(all.len(), 1104);
/// assert!(all.iter().all(|c| c.is_valid()));
/// ```
pub fn enumerate(config: EnumeratorConfig) -> Result<Vec<LetterConstraint>, ConstraintError> {
    let length = config.word_length;
    if length == 0 || length > PositionSet::MAX_POSITIONS {
        return Err(ConstraintError::UnsupportedWordLength(length));
    }

    let masks = 1u16 << length;
    let mut seen = FxHashSet::default();
    let mut descriptors = Vec::new();

    for frequency in 0..=config.max_frequency {
        let Ok(frequency) = u8::try_from(frequency) else {
            break;
        };
        for exact in [false, true] {
            for must_bits in 0..masks {
                let must = PositionSet::from_bits(must_bits as u8);
                if must.len() > usize::from(frequency) {
                    continue;
                }

                for cant_bits in 0..masks {
                    let cant = PositionSet::from_bits(cant_bits as u8);
                    if must.intersects(cant) {
                        continue;
                    }

                    let descriptor = LetterConstraint {
                        must,
                        cant,
                        frequency,
                        exact,
                    };
                    if descriptor.is_valid() && seen.insert(descriptor) {
                        descriptors.push(descriptor);
                    }
                }
            }
        }
    }

    Ok(descriptors)
}

/// Summary counts over a descriptor list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptorStats {
    /// `by_frequency[f]` = number of descriptors with frequency `f`
    pub by_frequency: Vec<usize>,
    pub exact: usize,
    pub lower_bound: usize,
}

impl DescriptorStats {
    #[must_use]
    pub fn from_descriptors(descriptors: &[LetterConstraint]) -> Self {
        let mut stats = Self::default();
        for descriptor in descriptors {
            let frequency = usize::from(descriptor.frequency);
            if stats.by_frequency.len() <= frequency {
                stats.by_frequency.resize(frequency + 1, 0);
            }
            stats.by_frequency[frequency] += 1;
            if descriptor.exact {
                stats.exact += 1;
            } else {
                stats.lower_bound += 1;
            }
        }
        stats
    }
}
