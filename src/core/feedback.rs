//! Feedback calculation and its compact integer encoding
//!
//! Each position gets one of three tags:
//! - 0 = Absent (letter not available in the answer)
//! - 1 = Present (letter in the answer, wrong position)
//! - 2 = Correct (letter in the correct position)
//!
//! The feedback is stored as a base-3 number with position 0 as the most
//! significant digit: `code = Σ tag[i] × 3^(L-1-i)`, so `code < 3^L`.

use super::word::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Per-position feedback tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Absent = 0,
    Present = 1,
    Correct = 2,
}

impl Tag {
    /// All tags in digit order
    pub const ALL: [Self; 3] = [Self::Absent, Self::Present, Self::Correct];

    /// Base-3 digit of this tag
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    /// Tag for a base-3 digit, `None` for digits above 2
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::Absent),
            1 => Some(Self::Present),
            2 => Some(Self::Correct),
            _ => None,
        }
    }

    /// Wire name used by every rendering layer
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        }
    }

    /// Colored square for terminal display
    #[must_use]
    pub const fn square(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Present => '🟨',
            Self::Correct => '🟩',
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised by the feedback codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("guess and answer must both be {expected} letters (guess: {guess}, answer: {answer})")]
    LengthMismatch {
        expected: usize,
        guess: usize,
        answer: usize,
    },
    #[error("byte {0:#04x} is not a lowercase ASCII letter")]
    InvalidLetter(u8),
    #[error("feedback code {0} is out of range (must be < {max})", max = Feedback::COUNT)]
    CodeOutOfRange(usize),
    #[error("invalid feedback string: {0:?}")]
    InvalidString(String),
}

/// Encoded feedback of a guess against an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Feedback(u8);

const fn pow3(exp: usize) -> usize {
    let mut value = 1;
    let mut i = 0;
    while i < exp {
        value *= 3;
        i += 1;
    }
    value
}

impl Feedback {
    /// Number of distinct feedback codes (3^L)
    pub const COUNT: usize = pow3(WORD_LENGTH);

    /// All positions correct
    pub const ALL_CORRECT: Self = Self((Self::COUNT - 1) as u8);

    /// All positions absent
    pub const ALL_ABSENT: Self = Self(0);

    /// Calculate the feedback for `guess` against `answer`
    ///
    /// Exact matches take priority and consume their letter. Remaining
    /// positions are then tagged Present left to right while the answer still
    /// has unconsumed occurrences of that letter.
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::core::{Feedback, Tag, Word};
    ///
    /// let guess = Word::new("robot").unwrap();
    /// let answer = Word::new("floor").unwrap();
    /// let feedback = Feedback::calculate(&guess, &answer);
    ///
    /// assert_eq!(
    ///     feedback.tags(),
    ///     [Tag::Present, Tag::Present, Tag::Absent, Tag::Correct, Tag::Absent]
    /// );
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        Self::from_tags(tag_positions(guess.chars(), answer.chars()))
    }

    /// Calculate the feedback for raw lowercase byte strings
    ///
    /// # Errors
    /// Returns `FeedbackError::LengthMismatch` if either side is not
    /// [`WORD_LENGTH`] bytes long, or `FeedbackError::InvalidLetter` for any
    /// byte outside `a..=z`.
    pub fn compute(guess: &[u8], answer: &[u8]) -> Result<Self, FeedbackError> {
        let mismatch = || FeedbackError::LengthMismatch {
            expected: WORD_LENGTH,
            guess: guess.len(),
            answer: answer.len(),
        };
        let guess: &[u8; WORD_LENGTH] = guess.try_into().map_err(|_| mismatch())?;
        let answer: &[u8; WORD_LENGTH] = answer.try_into().map_err(|_| mismatch())?;
        if let Some(&bad) = guess.iter().chain(answer).find(|b| !b.is_ascii_lowercase()) {
            return Err(FeedbackError::InvalidLetter(bad));
        }
        Ok(Self::from_tags(tag_positions(guess, answer)))
    }

    /// Encode a tag sequence
    #[must_use]
    pub fn from_tags(tags: [Tag; WORD_LENGTH]) -> Self {
        let code = tags.iter().fold(0u8, |code, tag| code * 3 + tag.digit());
        Self(code)
    }

    /// Decode into per-position tags, position 0 first
    #[must_use]
    pub fn tags(self) -> [Tag; WORD_LENGTH] {
        let mut tags = [Tag::Absent; WORD_LENGTH];
        let mut value = self.0;
        for tag in tags.iter_mut().rev() {
            *tag = match value % 3 {
                2 => Tag::Correct,
                1 => Tag::Present,
                _ => Tag::Absent,
            };
            value /= 3;
        }
        tags
    }

    /// Rebuild a feedback value from its integer code
    ///
    /// # Errors
    /// Returns `FeedbackError::CodeOutOfRange` if `code >= Feedback::COUNT`.
    pub fn from_code(code: usize) -> Result<Self, FeedbackError> {
        if code >= Self::COUNT {
            return Err(FeedbackError::CodeOutOfRange(code));
        }
        Ok(Self(code as u8))
    }

    /// Raw code in `0..Feedback::COUNT`
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Code as an array index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if every position is correct
    #[inline]
    #[must_use]
    pub const fn is_all_correct(self) -> bool {
        self.0 == Self::ALL_CORRECT.0
    }

    /// Number of positions carrying `tag`
    #[must_use]
    pub fn count(self, tag: Tag) -> usize {
        self.tags().iter().filter(|&&t| t == tag).count()
    }

    /// Wire names of each position, e.g. `["absent", "present", ...]`
    #[must_use]
    pub fn names(self) -> [&'static str; WORD_LENGTH] {
        self.tags().map(Tag::name)
    }
}

/// Two-pass duplicate-aware tagging
// Allow: both passes index guess, answer and tags in lockstep
#[allow(clippy::needless_range_loop)]
fn tag_positions(guess: &[u8; WORD_LENGTH], answer: &[u8; WORD_LENGTH]) -> [Tag; WORD_LENGTH] {
    let mut tags = [Tag::Absent; WORD_LENGTH];
    let mut available = [0u8; ALPHABET_SIZE];

    for i in 0..WORD_LENGTH {
        if guess[i] == answer[i] {
            tags[i] = Tag::Correct;
        } else {
            available[letter_index(answer[i])] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if tags[i] == Tag::Correct {
            continue;
        }
        let pool = &mut available[letter_index(guess[i])];
        if *pool > 0 {
            tags[i] = Tag::Present;
            *pool -= 1;
        }
    }

    tags
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in self.tags() {
            write!(f, "{}", tag.square())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Feedback {
    type Err = FeedbackError;

    /// Parse `"GY-G-"`-style letters or colored squares
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FeedbackError::InvalidString(s.to_string());
        let parsed = s
            .chars()
            .map(|ch| match ch {
                'G' | 'g' | '🟩' => Ok(Tag::Correct),
                'Y' | 'y' | '🟨' => Ok(Tag::Present),
                '-' | '_' | '⬜' => Ok(Tag::Absent),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tags: [Tag; WORD_LENGTH] = parsed.try_into().map_err(|_| invalid())?;
        Ok(Self::from_tags(tags))
    }
}
