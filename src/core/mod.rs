//! Core domain types
//!
//! Words, the feedback codec, and the bitset used to represent candidate
//! answer sets. Everything here is pure and independent of the word lists.

mod bitset;
mod feedback;
mod word;

pub use bitset::CandidateSet;
pub use feedback::{Feedback, FeedbackError, Tag};
pub use word::{ALPHABET_SIZE, WORD_LENGTH, Word, WordError};
