//! Word representation
//!
//! A Word stores a fixed-length lowercase word along with the per-letter data
//! that feedback computation and pair pruning need.

use std::fmt;
use thiserror::Error;

/// Number of letters in every word of the game
pub const WORD_LENGTH: usize = 5;

/// Size of the letter alphabet (`a`..=`z`)
pub const ALPHABET_SIZE: usize = 26;

/// A validated lowercase word of exactly [`WORD_LENGTH`] letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: String,
    chars: [u8; WORD_LENGTH],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word must contain only ASCII letters")]
    NonAscii,
    #[error("word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Input is lowercased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly [`WORD_LENGTH`]
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let chars: [u8; WORD_LENGTH] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(text.len()))?;

        if !chars.iter().all(u8::is_ascii_lowercase) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text, chars })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LENGTH] {
        &self.chars
    }

    /// Get the character at a specific position
    ///
    /// # Panics
    /// Panics if position >= [`WORD_LENGTH`]
    #[inline]
    #[must_use]
    pub const fn char_at(&self, position: usize) -> u8 {
        self.chars[position]
    }

    /// Number of occurrences of `letter` in the word
    #[inline]
    #[must_use]
    pub fn count_of(&self, letter: u8) -> usize {
        self.chars.iter().filter(|&&c| c == letter).count()
    }

    /// Occurrence count of every letter, indexed by `letter - b'a'`
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &ch in &self.chars {
            counts[letter_index(ch)] += 1;
        }
        counts
    }

    /// 26-bit letter-presence mask (bit `k` set when letter `'a' + k` occurs)
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::core::Word;
    ///
    /// let crane = Word::new("crane").unwrap();
    /// let spilt = Word::new("spilt").unwrap();
    /// assert_eq!(crane.letter_mask() & spilt.letter_mask(), 0);
    /// ```
    #[must_use]
    pub fn letter_mask(&self) -> u32 {
        self.chars
            .iter()
            .fold(0u32, |mask, &ch| mask | (1 << letter_index(ch)))
    }

    /// Number of distinct letters in the word
    #[inline]
    #[must_use]
    pub fn distinct_letters(&self) -> usize {
        self.letter_mask().count_ones() as usize
    }

    /// Highest occurrence count of any single letter
    #[must_use]
    pub fn max_multiplicity(&self) -> usize {
        self.letter_counts().into_iter().max().map_or(0, usize::from)
    }
}

/// Index of a lowercase ASCII letter in the alphabet
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    usize::from(letter - b'a')
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.text(), "crane");
        assert_eq!(word.chars(), b"crane");
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("CRANE").unwrap();
        assert_eq!(word.text(), "crane");

        let word2 = Word::new("CrAnE").unwrap();
        assert_eq!(word2.text(), "crane");
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(Word::new("too long"), Err(WordError::InvalidLength(8)));
        assert_eq!(Word::new("shrt"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::new("cran3"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cran "), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cran!"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cranë"), Err(WordError::NonAscii));
    }

    #[test]
    fn word_char_at() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.char_at(0), b'c');
        assert_eq!(word.char_at(4), b'e');
    }

    #[test]
    fn word_letter_counts_duplicates() {
        let word = Word::new("speed").unwrap();
        let counts = word.letter_counts();
        assert_eq!(counts[letter_index(b'e')], 2);
        assert_eq!(counts[letter_index(b's')], 1);
        assert_eq!(counts[letter_index(b'z')], 0);
        assert_eq!(word.count_of(b'e'), 2);
        assert_eq!(word.max_multiplicity(), 2);
    }

    #[test]
    fn word_letter_mask() {
        let word = Word::new("abide").unwrap();
        assert_eq!(word.letter_mask(), 0b1_1011);
        assert_eq!(word.distinct_letters(), 5);

        let word = Word::new("aaaaa").unwrap();
        assert_eq!(word.letter_mask(), 1);
        assert_eq!(word.distinct_letters(), 1);
        assert_eq!(word.max_multiplicity(), 5);
    }

    #[test]
    fn word_display() {
        let word = Word::new("crane").unwrap();
        assert_eq!(format!("{word}"), "crane");
    }

    #[test]
    fn word_equality() {
        let word1 = Word::new("crane").unwrap();
        let word3 = Word::new("CRANE").unwrap();
        let word4 = Word::new("slate").unwrap();

        assert_eq!(word1, word3);
        assert_ne!(word1, word4);
    }
}
