//! Candidate index
//!
//! For every guess, partitions the answer vocabulary into buckets keyed by
//! the feedback each answer produces. Buckets are bitsets over answer
//! indices. The index is built once, never mutated afterwards, and shared
//! read-only by every filter and search.

pub mod cache;

use crate::core::{CandidateSet, Feedback, Word};
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Answer buckets of a single guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessBuckets {
    /// Feedback codes present for this guess, ascending
    codes: Vec<Feedback>,
    /// `sets[k]` holds the answers producing `codes[k]`
    sets: Vec<CandidateSet>,
    /// Bucket slot of every answer index
    slots: Vec<u8>,
}

impl GuessBuckets {
    /// Bucket every answer by its feedback against `guess`
    #[must_use]
    pub fn build(guess: &Word, answers: &[Word]) -> Self {
        let feedback: Vec<Feedback> = answers
            .iter()
            .map(|answer| Feedback::calculate(guess, answer))
            .collect();

        let mut codes = feedback.clone();
        codes.sort_unstable();
        codes.dedup();

        let mut slot_of = [0u8; Feedback::COUNT];
        for (slot, code) in codes.iter().enumerate() {
            slot_of[code.index()] = slot as u8;
        }

        let mut sets = vec![CandidateSet::new(answers.len()); codes.len()];
        let slots: Vec<u8> = feedback.iter().map(|f| slot_of[f.index()]).collect();
        for (answer, &slot) in slots.iter().enumerate() {
            sets[usize::from(slot)].insert(answer);
        }

        Self { codes, sets, slots }
    }

    /// Bucket for a feedback code, `None` if no answer produces it
    #[must_use]
    pub fn bucket(&self, feedback: Feedback) -> Option<&CandidateSet> {
        self.codes
            .binary_search(&feedback)
            .ok()
            .map(|slot| &self.sets[slot])
    }

    /// Bucket containing `answer`
    #[inline]
    #[must_use]
    pub fn lookup(&self, answer: usize) -> &CandidateSet {
        &self.sets[usize::from(self.slots[answer])]
    }

    /// Feedback `answer` produces against this guess
    #[inline]
    #[must_use]
    pub fn feedback(&self, answer: usize) -> Feedback {
        self.codes[usize::from(self.slots[answer])]
    }

    /// Iterate `(feedback, bucket)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (Feedback, &CandidateSet)> {
        self.codes.iter().copied().zip(&self.sets)
    }

    /// Number of distinct feedback codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Size of the largest bucket
    #[must_use]
    pub fn largest(&self) -> usize {
        self.sets.iter().map(CandidateSet::len).max().unwrap_or(0)
    }

    fn answer_count(&self) -> usize {
        self.slots.len()
    }
}

/// Feedback buckets of every guess over a fixed answer vocabulary
pub struct CandidateIndex {
    guesses: Vec<Word>,
    answers: Vec<Word>,
    entries: Vec<GuessBuckets>,
    guess_ids: FxHashMap<String, usize>,
    answer_ids: FxHashMap<String, usize>,
    all_answers: CandidateSet,
}

impl CandidateIndex {
    /// Build the index, one guess per parallel task
    ///
    /// `progress` advances once per guess.
    ///
    /// # Examples
    /// ```
    /// use indicatif::ProgressBar;
    /// use wordle_bitset::core::Word;
    /// use wordle_bitset::index::CandidateIndex;
    ///
    /// let words: Vec<Word> = ["crane", "slate", "crate"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let index = CandidateIndex::build(&words, &words, &ProgressBar::hidden());
    ///
    /// // Guessing "crane" when the answer is "crane" leaves only "crane"
    /// assert_eq!(index.lookup(0, 0).iter().collect::<Vec<_>>(), vec![0]);
    /// ```
    #[must_use]
    pub fn build(guesses: &[Word], answers: &[Word], progress: &ProgressBar) -> Self {
        let start = Instant::now();
        let entries: Vec<GuessBuckets> = guesses
            .par_iter()
            .map(|guess| {
                let buckets = GuessBuckets::build(guess, answers);
                progress.inc(1);
                buckets
            })
            .collect();

        let index = Self::from_parts(guesses.to_vec(), answers.to_vec(), entries);
        info!(
            "indexed {} guesses x {} answers ({} buckets) in {:.2}s",
            index.guesses.len(),
            index.answers.len(),
            index.bucket_count(),
            start.elapsed().as_secs_f64()
        );
        index
    }

    /// Assemble an index from already-built buckets
    pub(crate) fn from_parts(guesses: Vec<Word>, answers: Vec<Word>, entries: Vec<GuessBuckets>) -> Self {
        debug_assert_eq!(guesses.len(), entries.len());
        debug_assert!(entries.iter().all(|e| e.answer_count() == answers.len()));

        let guess_ids = first_positions(&guesses);
        let answer_ids = first_positions(&answers);
        let all_answers = CandidateSet::full(answers.len());
        debug!(
            "candidate index ready: {} guesses, {} answers",
            guesses.len(),
            answers.len()
        );

        Self {
            guesses,
            answers,
            entries,
            guess_ids,
            answer_ids,
            all_answers,
        }
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// Set of every answer index
    #[must_use]
    pub const fn answer_set(&self) -> &CandidateSet {
        &self.all_answers
    }

    /// Index of a guess word in the guess vocabulary
    #[must_use]
    pub fn guess_id(&self, word: &str) -> Option<usize> {
        self.guess_ids.get(word).copied()
    }

    /// Index of an answer word in the answer vocabulary
    #[must_use]
    pub fn answer_id(&self, word: &str) -> Option<usize> {
        self.answer_ids.get(word).copied()
    }

    /// All buckets of one guess
    ///
    /// # Panics
    /// Panics if `guess` is not a valid guess index
    #[must_use]
    pub fn buckets(&self, guess: usize) -> &GuessBuckets {
        &self.entries[guess]
    }

    /// Answers that produce `feedback` against `guess`
    #[must_use]
    pub fn bucket(&self, guess: usize, feedback: Feedback) -> Option<&CandidateSet> {
        self.entries[guess].bucket(feedback)
    }

    /// Answers indistinguishable from `answer` after guessing `guess`
    #[inline]
    #[must_use]
    pub fn lookup(&self, guess: usize, answer: usize) -> &CandidateSet {
        self.entries[guess].lookup(answer)
    }

    /// Feedback of `guess` against `answer`, read from the index
    #[inline]
    #[must_use]
    pub fn feedback(&self, guess: usize, answer: usize) -> Feedback {
        self.entries[guess].feedback(answer)
    }

    /// Total number of buckets over all guesses
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.entries.iter().map(GuessBuckets::len).sum()
    }

    pub(crate) fn entries(&self) -> &[GuessBuckets] {
        &self.entries
    }
}

fn first_positions(words: &[Word]) -> FxHashMap<String, usize> {
    let mut ids = FxHashMap::default();
    for (i, word) in words.iter().enumerate() {
        ids.entry(word.text().to_string()).or_insert(i);
    }
    ids
}
