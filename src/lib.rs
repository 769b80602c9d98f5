//! Wordle Bitset
//!
//! Exhaustive search for the Wordle opening guess (or guess pair) that
//! leaves the fewest candidate answers, backed by a bitset candidate index.
//!
//! # Quick Start
//!
//! ```rust
//! use indicatif::ProgressBar;
//! use wordle_bitset::core::{Feedback, Word};
//! use wordle_bitset::index::CandidateIndex;
//! use wordle_bitset::search::{Metric, SearchEngine};
//!
//! let words: Vec<Word> = ["crane", "slate", "crate", "irate"]
//!     .iter()
//!     .map(|w| Word::new(*w).unwrap())
//!     .collect();
//!
//! // Feedback of one guess against one answer
//! let feedback = Feedback::calculate(&words[0], &words[1]);
//! println!("{feedback}");
//!
//! // Best opening guess over the vocabulary
//! let index = CandidateIndex::build(&words, &words, &ProgressBar::hidden());
//! let best = SearchEngine::new(&index, Metric::Average)
//!     .best_guess(&ProgressBar::hidden())
//!     .unwrap();
//! assert!(best.score >= 1.0);
//! ```

// Core domain types
pub mod core;

// Letter constraints and the structural filtering path
pub mod constraint;

// Guess x feedback candidate index
pub mod index;

// Best guess and best pair search
pub mod search;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
