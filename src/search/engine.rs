//! Exhaustive best-guess and best-pair search
//!
//! Both searches score every candidate against the full answer set and keep
//! the lowest score in a [`SharedBest`]. Pair search only pairs guesses with
//! five distinct letters and skips any pair sharing a letter.

use super::best::{Ranked, SharedBest};
use super::executor::{Executor, Parallel};
use super::metric::Metric;
use crate::core::{WORD_LENGTH, Word};
use crate::index::CandidateIndex;
use indicatif::ProgressBar;
use log::{debug, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Outcome of a search
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Winning guesses, in play order
    pub words: Vec<Word>,
    /// Their indices in the guess vocabulary
    pub ids: Vec<usize>,
    pub score: f64,
    pub metric: Metric,
    /// Candidates scored
    pub evaluated: usize,
    /// Candidates pruned without scoring
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Search over a read-only candidate index
pub struct SearchEngine<'a, E = Parallel> {
    index: &'a CandidateIndex,
    metric: Metric,
    executor: E,
}

impl<'a> SearchEngine<'a, Parallel> {
    /// Parallel engine over `index`
    #[must_use]
    pub const fn new(index: &'a CandidateIndex, metric: Metric) -> Self {
        Self::with_executor(index, metric, Parallel)
    }
}

impl<'a, E: Executor> SearchEngine<'a, E> {
    #[must_use]
    pub const fn with_executor(index: &'a CandidateIndex, metric: Metric, executor: E) -> Self {
        Self {
            index,
            metric,
            executor,
        }
    }

    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Score an explicit guess sequence (indices into the guess vocabulary)
    #[must_use]
    pub fn score_sequence(&self, guesses: &[usize]) -> f64 {
        self.metric.score(self.index, guesses)
    }

    /// Best single guess over the whole guess vocabulary
    ///
    /// Returns `None` when there are no guesses or no answers.
    ///
    /// # Examples
    /// ```
    /// use indicatif::ProgressBar;
    /// use wordle_bitset::core::Word;
    /// use wordle_bitset::index::CandidateIndex;
    /// use wordle_bitset::search::{Metric, SearchEngine};
    ///
    /// let answers: Vec<Word> = ["slate", "irate", "crate", "grate"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let mut guesses = vec![Word::new("zzzzz").unwrap()];
    /// guesses.extend(answers.iter().cloned());
    ///
    /// let index = CandidateIndex::build(&guesses, &answers, &ProgressBar::hidden());
    /// let engine = SearchEngine::new(&index, Metric::Average);
    /// let best = engine.best_guess(&ProgressBar::hidden()).unwrap();
    /// assert_ne!(best.words[0].text(), "zzzzz");
    /// ```
    #[must_use]
    pub fn best_guess(&self, progress: &ProgressBar) -> Option<SearchResult> {
        let start = Instant::now();
        let guesses = self.index.guesses().len();
        if guesses == 0 || self.index.answers().is_empty() {
            return None;
        }

        progress.set_length(guesses as u64);
        let shared = SharedBest::new();
        self.executor.run(guesses, |guess| {
            let score = self.score_sequence(&[guess]);
            shared.offer(Ranked::new(score, vec![guess]));
            progress.inc(1);
        });
        progress.finish_and_clear();

        let best = shared.into_inner()?;
        let result = self.result(best, guesses, 0, start.elapsed());
        info!(
            "best guess {} ({} {:.4}) from {} guesses in {:.2}s [{}]",
            result.words[0],
            self.metric,
            result.score,
            guesses,
            result.elapsed.as_secs_f64(),
            self.executor.name()
        );
        Some(result)
    }

    /// Best unordered pair of letter-disjoint guesses, played in guess-list order
    ///
    /// Each pair is scored once, earlier guess first; the reverse order is
    /// not tried. Guesses with a repeated letter never take part. Each worker reduces
    /// the pairs of one outer guess locally, then offers its best to the
    /// shared result. Returns `None` when no pair qualifies or there are no
    /// answers.
    #[must_use]
    pub fn best_pair(&self, progress: &ProgressBar) -> Option<SearchResult> {
        let start = Instant::now();
        if self.index.answers().is_empty() {
            return None;
        }

        let pool: Vec<usize> = self
            .index
            .guesses()
            .iter()
            .enumerate()
            .filter(|(_, word)| word.distinct_letters() == WORD_LENGTH)
            .map(|(i, _)| i)
            .collect();
        let masks: Vec<u32> = pool
            .iter()
            .map(|&i| self.index.guesses()[i].letter_mask())
            .collect();
        debug!(
            "pair search over {} of {} guesses",
            pool.len(),
            self.index.guesses().len()
        );

        progress.set_length(pool.len() as u64);
        let shared = SharedBest::new();
        let evaluated = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);

        self.executor.run(pool.len(), |i| {
            let mut local: Option<Ranked> = None;
            let mut scored = 0;
            let mut pruned = 0;
            for j in i + 1..pool.len() {
                if masks[i] & masks[j] != 0 {
                    pruned += 1;
                    continue;
                }
                let pair = vec![pool[i], pool[j]];
                let candidate = Ranked::new(self.score_sequence(&pair), pair);
                scored += 1;
                local = Some(match local {
                    Some(current) => current.min(candidate),
                    None => candidate,
                });
            }
            evaluated.fetch_add(scored, Ordering::Relaxed);
            skipped.fetch_add(pruned, Ordering::Relaxed);

            if let Some(best) = local
                && shared.offer(best)
                && let Some(current) = shared.snapshot()
            {
                progress.set_message(self.describe(&current));
            }
            progress.inc(1);
        });
        progress.finish_and_clear();

        let best = shared.into_inner()?;
        let result = self.result(
            best,
            evaluated.into_inner(),
            skipped.into_inner(),
            start.elapsed(),
        );
        info!(
            "best pair {} ({} {:.4}); {} pairs scored, {} pruned in {:.2}s [{}]",
            join_words(&result.words),
            self.metric,
            result.score,
            result.evaluated,
            result.skipped,
            result.elapsed.as_secs_f64(),
            self.executor.name()
        );
        Some(result)
    }

    fn result(&self, best: Ranked, evaluated: usize, skipped: usize, elapsed: Duration) -> SearchResult {
        let words = best
            .guesses
            .iter()
            .map(|&i| self.index.guesses()[i].clone())
            .collect();
        SearchResult {
            words,
            ids: best.guesses,
            score: best.score,
            metric: self.metric,
            evaluated,
            skipped,
            elapsed,
        }
    }

    fn describe(&self, ranked: &Ranked) -> String {
        let words: Vec<Word> = ranked
            .guesses
            .iter()
            .map(|&i| self.index.guesses()[i].clone())
            .collect();
        format!("best {} {:.4}", join_words(&words), ranked.score)
    }
}

fn join_words(words: &[Word]) -> String {
    words.iter().map(Word::text).collect::<Vec<_>>().join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::executor::Sequential;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn hidden() -> ProgressBar {
        ProgressBar::hidden()
    }

    fn sample_index() -> CandidateIndex {
        let answers = words(&[
            "fight", "light", "might", "night", "right", "sight", "tight", "crane", "slate",
            "crate", "grate", "plumb", "dowdy",
        ]);
        let mut guesses = answers.clone();
        guesses.extend(words(&["flims", "grown", "champ", "geese", "zzzzz"]));
        CandidateIndex::build(&guesses, &answers, &hidden())
    }

    fn brute_force_pair(index: &CandidateIndex, metric: Metric) -> f64 {
        let guesses = index.guesses();
        let mut best = f64::INFINITY;
        for i in 0..guesses.len() {
            for j in i + 1..guesses.len() {
                let (a, b) = (&guesses[i], &guesses[j]);
                if a.distinct_letters() < WORD_LENGTH
                    || b.distinct_letters() < WORD_LENGTH
                    || a.letter_mask() & b.letter_mask() != 0
                {
                    continue;
                }
                best = best.min(metric.score(index, &[i, j]));
            }
        }
        best
    }

    #[test]
    fn best_guess_matches_exhaustive_minimum() {
        let index = sample_index();
        for metric in [Metric::Average, Metric::WorstCase] {
            let engine = SearchEngine::new(&index, metric);
            let result = engine.best_guess(&hidden()).unwrap();

            let expected = (0..index.guesses().len())
                .map(|g| metric.score(&index, &[g]))
                .fold(f64::INFINITY, f64::min);
            assert!((result.score - expected).abs() < 1e-12);
            assert_eq!(result.evaluated, index.guesses().len());
            assert_eq!(result.words[0], index.guesses()[result.ids[0]]);
        }
    }

    #[test]
    fn best_pair_matches_brute_force() {
        let index = sample_index();
        for metric in [Metric::Average, Metric::WorstCase] {
            let result = SearchEngine::new(&index, metric)
                .best_pair(&hidden())
                .unwrap();
            assert!((result.score - brute_force_pair(&index, metric)).abs() < 1e-12);
        }
    }

    #[test]
    fn best_pair_respects_pruning() {
        let index = sample_index();
        let result = SearchEngine::new(&index, Metric::Average)
            .best_pair(&hidden())
            .unwrap();

        let [first, second] = result.words.as_slice() else {
            panic!("expected a pair, got {:?}", result.words);
        };
        assert_eq!(first.letter_mask() & second.letter_mask(), 0);
        assert_eq!(first.distinct_letters(), WORD_LENGTH);
        assert_eq!(second.distinct_letters(), WORD_LENGTH);
        assert!(result.ids[0] < result.ids[1]);
        assert!(result.skipped > 0);
    }

    #[test]
    fn best_pair_is_played_in_guess_list_order() {
        let index = sample_index();
        for metric in [Metric::Average, Metric::WorstCase] {
            let engine = SearchEngine::new(&index, metric);
            let result = engine.best_pair(&hidden()).unwrap();

            assert!(result.ids[0] < result.ids[1]);
            assert!((result.score - engine.score_sequence(&result.ids)).abs() < f64::EPSILON);
            assert_eq!(result.words[0], index.guesses()[result.ids[0]]);
            assert_eq!(result.words[1], index.guesses()[result.ids[1]]);
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let index = sample_index();
        for metric in [Metric::Average, Metric::WorstCase] {
            let parallel = SearchEngine::new(&index, metric);
            let sequential = SearchEngine::with_executor(&index, metric, Sequential);

            let a = parallel.best_pair(&hidden()).unwrap();
            let b = sequential.best_pair(&hidden()).unwrap();
            assert_eq!(a.ids, b.ids);
            assert!((a.score - b.score).abs() < f64::EPSILON);
            assert_eq!(a.evaluated, b.evaluated);
            assert_eq!(a.skipped, b.skipped);

            let a = parallel.best_guess(&hidden()).unwrap();
            let b = sequential.best_guess(&hidden()).unwrap();
            assert_eq!(a.ids, b.ids);
        }
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let index = sample_index();
        let engine = SearchEngine::new(&index, Metric::Average);
        let first = engine.best_pair(&hidden()).unwrap();
        for _ in 0..5 {
            let again = engine.best_pair(&hidden()).unwrap();
            assert_eq!(again.ids, first.ids);
            assert!((again.score - first.score).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ties_resolve_to_smallest_indices() {
        // With two answers every first bucket is already solved, so all
        // pairs score 1.0
        let answers = words(&["crane", "slate"]);
        let guesses = words(&["geese", "bumpy", "crane", "fight", "dwelt"]);
        let index = CandidateIndex::build(&guesses, &answers, &hidden());

        let engine = SearchEngine::with_executor(&index, Metric::Average, Parallel);
        let pair = engine.best_pair(&hidden()).unwrap();
        assert!((pair.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(pair.ids, vec![1, 2]);

        // "geese", "crane" and "dwelt" all split the two answers
        let single = engine.best_guess(&hidden()).unwrap();
        assert!((single.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(single.words[0].text(), "geese");
    }

    #[test]
    fn empty_inputs_have_no_result() {
        let guesses = words(&["crane", "slate"]);
        let index = CandidateIndex::build(&guesses, &[], &hidden());
        let engine = SearchEngine::new(&index, Metric::Average);
        assert!(engine.best_guess(&hidden()).is_none());
        assert!(engine.best_pair(&hidden()).is_none());
        assert!(engine.score_sequence(&[0]).is_infinite());

        // No guess has five distinct letters
        let answers = words(&["geese", "llama"]);
        let index = CandidateIndex::build(&answers, &answers, &hidden());
        let engine = SearchEngine::new(&index, Metric::WorstCase);
        assert!(engine.best_pair(&hidden()).is_none());
        assert!(engine.best_guess(&hidden()).is_some());
    }

    #[test]
    fn score_sequence_uses_metric() {
        let index = sample_index();
        let crane = index.guess_id("crane").unwrap();
        let engine = SearchEngine::new(&index, Metric::WorstCase);
        assert!((engine.score_sequence(&[crane]) - Metric::WorstCase.score(&index, &[crane])).abs() < f64::EPSILON);
        assert_eq!(engine.metric(), Metric::WorstCase);
    }
}
