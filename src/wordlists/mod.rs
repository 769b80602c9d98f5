//! Word lists
//!
//! Guess and answer vocabularies are read from plain-text files at startup.

pub mod loader;

pub use loader::{LoadError, load_from_file, parse_words};

use crate::core::Word;
use rustc_hash::FxHashSet;

/// Answers that do not appear in the guess list
#[must_use]
pub fn missing_from<'a>(answers: &'a [Word], guesses: &[Word]) -> Vec<&'a Word> {
    let known: FxHashSet<&str> = guesses.iter().map(Word::text).collect();
    answers.iter().filter(|a| !known.contains(a.text())).collect()
}
