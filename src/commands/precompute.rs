//! Constraint catalogue precomputation
//!
//! Enumerates every letter-constraint descriptor, writes them as JSON, and
//! builds the per-letter bitsets over the answer vocabulary.

use crate::constraint::{
    ConstraintDatabase, DescriptorStats, EnumeratorConfig, LetterConstraint, enumerate,
};
use crate::core::Word;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "wordle_hints.json";

/// Options for a precomputation run
#[derive(Debug, Clone)]
pub struct PrecomputeConfig {
    pub output: PathBuf,
    /// Frequency cap; derived from the answer list when `None`
    pub max_frequency: Option<usize>,
}

impl Default for PrecomputeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_frequency: None,
        }
    }
}

#[derive(Serialize)]
struct Metadata {
    version: &'static str,
    description: &'static str,
    total: usize,
    word_length: usize,
    max_frequency: usize,
}

#[derive(Serialize)]
struct Catalogue<'a> {
    metadata: Metadata,
    stats: &'a DescriptorStats,
    letter_constraints: &'a [LetterConstraint],
}

/// What a precomputation run produced
#[derive(Debug, Clone)]
pub struct PrecomputeSummary {
    pub output: PathBuf,
    pub bytes: u64,
    pub config: EnumeratorConfig,
    pub descriptors: usize,
    pub stats: DescriptorStats,
    /// (letter, descriptor) bitsets built over the answers
    pub bitsets: usize,
    /// Of those, bitsets matching at least one answer
    pub non_empty: usize,
}

/// Enumerate descriptors, write the catalogue, and build the bitset database
///
/// # Errors
///
/// Returns an error if the enumeration configuration is unsupported or the
/// output file cannot be written.
pub fn run_precompute(config: &PrecomputeConfig, answers: &[Word], progress: &ProgressBar) -> Result<PrecomputeSummary> {
    let enumeration = match config.max_frequency {
        Some(cap) => EnumeratorConfig::new(EnumeratorConfig::default().word_length, cap),
        None => EnumeratorConfig::for_vocabulary(answers),
    };
    let descriptors = enumerate(enumeration).context("descriptor enumeration failed")?;
    let stats = DescriptorStats::from_descriptors(&descriptors);
    info!(
        "enumerated {} descriptors (word length {}, frequency cap {})",
        descriptors.len(),
        enumeration.word_length,
        enumeration.max_frequency
    );

    let bytes = write_catalogue(&config.output, enumeration, &stats, &descriptors)?;

    progress.set_length(26);
    let database = ConstraintDatabase::build(answers, &descriptors, progress);
    progress.finish_and_clear();

    Ok(PrecomputeSummary {
        output: config.output.clone(),
        bytes,
        config: enumeration,
        descriptors: descriptors.len(),
        stats,
        bitsets: database.len(),
        non_empty: database.non_empty(),
    })
}

fn write_catalogue(
    path: &Path,
    config: EnumeratorConfig,
    stats: &DescriptorStats,
    descriptors: &[LetterConstraint],
) -> Result<u64> {
    let catalogue = Catalogue {
        metadata: Metadata {
            version: env!("CARGO_PKG_VERSION"),
            description: "Precomputed Wordle letter constraints",
            total: descriptors.len(),
            word_length: config.word_length,
            max_frequency: config.max_frequency,
        },
        stats,
        letter_constraints: descriptors,
    };

    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &catalogue)
        .with_context(|| format!("cannot write {}", path.display()))?;
    writer.flush()?;

    let bytes = std::fs::metadata(path)?.len();
    info!("wrote {} descriptors to {} ({bytes} bytes)", descriptors.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_output(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wordle_bitset_{}_{name}.json", std::process::id()))
    }

    #[test]
    fn writes_catalogue_and_builds_database() {
        let answers: Vec<Word> = ["crane", "geese", "mamma"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect();
        let config = PrecomputeConfig {
            output: temp_output("catalogue"),
            max_frequency: Some(3),
        };

        let summary = run_precompute(&config, &answers, &ProgressBar::hidden()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.output).unwrap()).unwrap();
        std::fs::remove_file(&config.output).ok();

        assert_eq!(summary.descriptors, 1104);
        assert_eq!(summary.bitsets, 26 * 1104);
        assert!(summary.non_empty > 0);
        assert!(summary.bytes > 0);
        assert_eq!(json["metadata"]["total"], 1104);
        assert_eq!(json["metadata"]["max_frequency"], 3);
        assert_eq!(json["letter_constraints"].as_array().unwrap().len(), 1104);
        assert_eq!(json["stats"]["exact"], 568);
        assert!(json["letter_constraints"][0]["must_be_in_positions"].is_array());
    }

    #[test]
    fn frequency_cap_follows_answers() {
        let answers: Vec<Word> = ["crane", "slate"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect();
        let config = PrecomputeConfig {
            output: temp_output("derived"),
            max_frequency: None,
        };
        let summary = run_precompute(&config, &answers, &ProgressBar::hidden()).unwrap();
        std::fs::remove_file(&config.output).ok();

        assert_eq!(summary.config.max_frequency, 1);
        assert_eq!(summary.stats.by_frequency.len(), 2);
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let config = PrecomputeConfig {
            output: PathBuf::from("/definitely/not/here/out.json"),
            max_frequency: Some(1),
        };
        assert!(run_precompute(&config, &[], &ProgressBar::hidden()).is_err());
    }
}
