//! Word list loading
//!
//! One word per line, surrounding whitespace trimmed, blank lines ignored.
//! Every remaining line must be a valid word; the first bad line aborts the
//! load with its line number.

use crate::core::{Word, WordError};
use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{origin}:{line}: invalid word {word:?}: {source}")]
    InvalidWord {
        origin: String,
        line: usize,
        word: String,
        #[source]
        source: WordError,
    },
}

/// Load words from a file
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or
/// `LoadError::InvalidWord` for the first line that is not a valid word.
///
/// # Examples
/// ```no_run
/// use wordle_bitset::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/answers.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_words(&content, &path.display().to_string())?;
    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Parse a word list held in memory
///
/// `origin` names the source in error messages. Duplicates are kept in
/// order (indices must stay aligned with the file) and reported once.
///
/// # Errors
///
/// Returns `LoadError::InvalidWord` for the first invalid line.
///
/// # Examples
/// ```
/// use wordle_bitset::wordlists::loader::parse_words;
///
/// let words = parse_words("crane\n  slate \n\nirate\n", "inline").unwrap();
/// assert_eq!(words.len(), 3);
/// assert_eq!(words[1].text(), "slate");
/// ```
pub fn parse_words(content: &str, origin: &str) -> Result<Vec<Word>, LoadError> {
    let mut words = Vec::new();
    let mut seen = FxHashSet::default();
    let mut duplicates = 0usize;

    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let word = Word::new(trimmed).map_err(|source| LoadError::InvalidWord {
            origin: origin.to_string(),
            line: number + 1,
            word: trimmed.to_string(),
            source,
        })?;
        if !seen.insert(word.text().to_string()) {
            duplicates += 1;
        }
        words.push(word);
    }

    if duplicates > 0 {
        warn!("{origin}: {duplicates} duplicate words");
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_skips_blank_lines() {
        let words = parse_words("  crane\n\n\tslate\t\n   \nirate", "test").unwrap();
        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, ["crane", "slate", "irate"]);
    }

    #[test]
    fn normalises_case() {
        let words = parse_words("CRANE\n", "test").unwrap();
        assert_eq!(words[0].text(), "crane");
    }

    #[test]
    fn invalid_word_reports_line() {
        let err = parse_words("crane\n\nslates\n", "list.txt").unwrap_err();
        match err {
            LoadError::InvalidWord { line, ref word, .. } => {
                assert_eq!(line, 3);
                assert_eq!(word, "slates");
            }
            LoadError::Io { .. } => panic!("unexpected error {err}"),
        }
        assert!(err.to_string().starts_with("list.txt:3:"));
    }

    #[test]
    fn empty_input_gives_empty_list() {
        assert!(parse_words("", "test").unwrap().is_empty());
        assert!(parse_words("\n \n", "test").unwrap().is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let words = parse_words("crane\ncrane\n", "test").unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_from_file("/definitely/not/here/words.txt");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("wordle_bitset_{}_words.txt", std::process::id()));
        fs::write(&path, "crane\nslate\n").unwrap();
        let words = load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(words.len(), 2);
    }
}
