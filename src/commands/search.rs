//! Search commands
//!
//! Best opening guess, best letter-disjoint pair, and scoring of an explicit
//! guess sequence.

use crate::core::{Feedback, Word};
use crate::index::CandidateIndex;
use crate::search::{Metric, SearchEngine, SearchResult, worst_case_remaining};
use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;

/// Find the single guess with the lowest score
///
/// # Errors
///
/// Returns an error if the guess or answer vocabulary is empty.
pub fn find_best_guess(index: &CandidateIndex, metric: Metric, progress: &ProgressBar) -> Result<SearchResult> {
    SearchEngine::new(index, metric)
        .best_guess(progress)
        .context("no best guess: the guess or answer list is empty")
}

/// Find the letter-disjoint guess pair with the lowest score
///
/// # Errors
///
/// Returns an error if there are no answers or no two guesses with five
/// distinct, non-overlapping letters.
pub fn find_best_pair(index: &CandidateIndex, metric: Metric, progress: &ProgressBar) -> Result<SearchResult> {
    SearchEngine::new(index, metric)
        .best_pair(progress)
        .context("no best pair: no answers or no letter-disjoint guesses")
}

/// One guess of a scored sequence
#[derive(Debug, Clone)]
pub struct GuessSummary {
    pub word: Word,
    /// Distinct feedback codes this guess can produce
    pub buckets: usize,
    /// Largest group of answers it leaves together
    pub largest_bucket: usize,
    /// Bucket sizes per feedback, largest first
    pub top_buckets: Vec<(Feedback, usize)>,
}

/// Result of scoring an explicit guess sequence
#[derive(Debug, Clone)]
pub struct SequenceScore {
    pub guesses: Vec<GuessSummary>,
    pub average: f64,
    pub worst_case: Option<usize>,
    pub total_answers: usize,
}

/// Score `words`, played in order, under both metrics
///
/// # Errors
///
/// Returns an error if `words` is empty or any word is not in the guess list.
pub fn score_guesses(index: &CandidateIndex, words: &[String]) -> Result<SequenceScore> {
    if words.is_empty() {
        bail!("at least one guess is required");
    }

    let ids = words
        .iter()
        .map(|text| {
            let word = Word::new(text.as_str()).with_context(|| format!("invalid guess {text:?}"))?;
            index
                .guess_id(word.text())
                .with_context(|| format!("'{word}' is not in the guess list"))
        })
        .collect::<Result<Vec<usize>>>()?;

    let guesses = ids.iter().map(|&id| summarize(index, id)).collect();
    Ok(SequenceScore {
        guesses,
        average: Metric::Average.score(index, &ids),
        worst_case: worst_case_remaining(index, &ids),
        total_answers: index.answers().len(),
    })
}

fn summarize(index: &CandidateIndex, id: usize) -> GuessSummary {
    let buckets = index.buckets(id);
    let mut top_buckets: Vec<(Feedback, usize)> = buckets.iter().map(|(code, set)| (code, set.len())).collect();
    top_buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    top_buckets.truncate(5);

    GuessSummary {
        word: index.guesses()[id].clone(),
        buckets: buckets.len(),
        largest_bucket: buckets.largest(),
        top_buckets,
    }
}
