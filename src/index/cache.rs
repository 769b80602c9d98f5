//! On-disk snapshot of the candidate index
//!
//! The snapshot records the vocabularies it was built from. A missing file,
//! a decode failure, or a snapshot built from different word lists is a
//! cache miss: the index is rebuilt and the snapshot rewritten.

use super::{CandidateIndex, GuessBuckets};
use crate::core::{CandidateSet, WORD_LENGTH, Word};
use indicatif::ProgressBar;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Bumped whenever the snapshot layout changes
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cache could not be decoded: {0}")]
    Decode(#[from] bincode::Error),
    #[error("cache is stale: {0}")]
    Stale(String),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    word_length: usize,
    guesses: Vec<&'a str>,
    answers: Vec<&'a str>,
    entries: &'a [GuessBuckets],
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    word_length: usize,
    guesses: Vec<String>,
    answers: Vec<String>,
    entries: Vec<GuessBuckets>,
}

/// Write `index` to `path`
///
/// # Errors
/// Returns `CacheError` if the file cannot be created or written.
pub fn save(index: &CandidateIndex, path: &Path) -> Result<(), CacheError> {
    let snapshot = SnapshotRef {
        version: CACHE_VERSION,
        word_length: WORD_LENGTH,
        guesses: index.guesses().iter().map(Word::text).collect(),
        answers: index.answers().iter().map(Word::text).collect(),
        entries: index.entries(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush()?;
    Ok(())
}

/// Read an index from `path`, checking it matches the given vocabularies
///
/// # Errors
/// Returns `CacheError` if the file is unreadable, undecodable, or was built
/// from a different configuration or word lists.
pub fn load(path: &Path, guesses: &[Word], answers: &[Word]) -> Result<CandidateIndex, CacheError> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != CACHE_VERSION {
        return Err(CacheError::Stale(format!(
            "version {} (expected {CACHE_VERSION})",
            snapshot.version
        )));
    }
    if snapshot.word_length != WORD_LENGTH {
        return Err(CacheError::Stale(format!(
            "word length {} (expected {WORD_LENGTH})",
            snapshot.word_length
        )));
    }
    if !same_words(&snapshot.guesses, guesses) {
        return Err(CacheError::Stale("guess list differs".to_string()));
    }
    if !same_words(&snapshot.answers, answers) {
        return Err(CacheError::Stale("answer list differs".to_string()));
    }
    if snapshot.entries.len() != guesses.len()
        || !snapshot.entries.iter().all(|e| e.is_consistent(answers.len()))
    {
        return Err(CacheError::Stale("bucket data is inconsistent".to_string()));
    }

    Ok(CandidateIndex::from_parts(
        guesses.to_vec(),
        answers.to_vec(),
        snapshot.entries,
    ))
}

/// Load the index from `path`, rebuilding (and re-saving) it on any miss
///
/// Failing to write the refreshed snapshot is logged and otherwise ignored.
pub fn load_or_build(
    path: &Path,
    guesses: &[Word],
    answers: &[Word],
    progress: &ProgressBar,
) -> CandidateIndex {
    match load(path, guesses, answers) {
        Ok(index) => {
            info!("loaded candidate index from {}", path.display());
            progress.finish_and_clear();
            return index;
        }
        Err(CacheError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("no index cache at {}, building", path.display());
        }
        Err(e) => warn!("ignoring index cache at {}: {e}", path.display()),
    }

    let index = CandidateIndex::build(guesses, answers, progress);
    match save(&index, path) {
        Ok(()) => info!("saved candidate index to {}", path.display()),
        Err(e) => warn!("could not save index cache to {}: {e}", path.display()),
    }
    index
}

fn same_words(cached: &[String], words: &[Word]) -> bool {
    cached.len() == words.len() && cached.iter().zip(words).all(|(c, w)| c == w.text())
}

impl GuessBuckets {
    /// Structural sanity check for buckets read from disk
    fn is_consistent(&self, answer_count: usize) -> bool {
        self.sets.len() == self.codes.len()
            && self.slots.len() == answer_count
            && self.sets.iter().all(|set| set.count_bits() == set.len())
            && self.codes.windows(2).all(|w| w[0] < w[1])
            && self.slots.iter().all(|&s| usize::from(s) < self.codes.len())
            && self.sets.iter().map(CandidateSet::len).sum::<usize>() == answer_count
            && self
                .slots
                .iter()
                .enumerate()
                .all(|(answer, &slot)| self.sets[usize::from(slot)].contains(answer))
    }
}
