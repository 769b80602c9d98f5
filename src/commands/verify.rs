//! Cross-validation of the filtering paths
//!
//! Draws random (guess, answer) pairs and checks that the bitset index, the
//! structural constraints and the precomputed constraint database all leave
//! the same candidates.

use crate::constraint::{ConstraintDatabase, CrossCheck, EnumeratorConfig, cross_check, enumerate};
use crate::core::{CandidateSet, Feedback};
use crate::index::CandidateIndex;
use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Mismatches kept in the report
const MAX_REPORTED: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct VerifyConfig {
    pub samples: usize,
    pub seed: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 0,
        }
    }
}

/// A pair on which the paths disagreed
#[derive(Debug, Clone)]
pub struct Mismatch {
    pub guess: String,
    pub answer: String,
    pub feedback: Feedback,
    pub bitset: usize,
    pub structural: usize,
    pub database: Option<usize>,
}

impl From<(&CandidateIndex, &CrossCheck)> for Mismatch {
    fn from((index, check): (&CandidateIndex, &CrossCheck)) -> Self {
        Self {
            guess: index.guesses()[check.guess].text().to_string(),
            answer: index.answers()[check.answer].text().to_string(),
            feedback: check.feedback,
            bitset: check.bitset.len(),
            structural: check.structural.len(),
            database: check.database.as_ref().map(CandidateSet::len),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub samples: usize,
    pub agreed: usize,
    pub failed: usize,
    /// First few disagreements
    pub mismatches: Vec<Mismatch>,
    /// Mean candidates left per sample
    pub mean_remaining: f64,
    pub duration: Duration,
}

impl VerifyReport {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failed == 0
    }
}

/// Check `config.samples` random pairs on every filtering path
///
/// # Errors
///
/// Returns an error if either vocabulary is empty or the constraint database
/// cannot be enumerated.
pub fn run_verify(index: &CandidateIndex, config: VerifyConfig, progress: &ProgressBar) -> Result<VerifyReport> {
    if index.guesses().is_empty() || index.answers().is_empty() {
        bail!("cannot verify with an empty guess or answer list");
    }

    let start = Instant::now();
    let descriptors = enumerate(EnumeratorConfig::for_vocabulary(index.answers()))
        .context("descriptor enumeration failed")?;
    let database = ConstraintDatabase::build(index.answers(), &descriptors, &ProgressBar::hidden());

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut agreed = 0;
    let mut mismatches = Vec::new();
    let mut remaining = 0usize;

    progress.set_length(config.samples as u64);
    for _ in 0..config.samples {
        let guess = rng.random_range(0..index.guesses().len());
        let answer = rng.random_range(0..index.answers().len());
        let check = cross_check(index, Some(&database), guess, answer);

        remaining += check.bitset.len();
        if check.agrees() {
            agreed += 1;
        } else {
            let mismatch = Mismatch::from((index, &check));
            warn!(
                "paths disagree for {} vs {}: bitset {}, structural {}, database {:?}",
                mismatch.guess, mismatch.answer, mismatch.bitset, mismatch.structural, mismatch.database
            );
            if mismatches.len() < MAX_REPORTED {
                mismatches.push(mismatch);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let failed = config.samples - agreed;
    info!("verified {} samples, {failed} mismatches", config.samples);
    Ok(VerifyReport {
        samples: config.samples,
        agreed,
        failed,
        mismatches,
        mean_remaining: if config.samples == 0 {
            0.0
        } else {
            remaining as f64 / config.samples as f64
        },
        duration: start.elapsed(),
    })
}
