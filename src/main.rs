//! Wordle Bitset - CLI
//!
//! Exhaustive opening-guess search over a bitset candidate index.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info, warn};
use std::path::{Path, PathBuf};
use wordle_bitset::{
    commands::{
        PrecomputeConfig, VerifyConfig, find_best_guess, find_best_pair, precompute,
        run_precompute, run_verify, score_guesses,
    },
    core::Word,
    index::{CandidateIndex, cache},
    output::{
        print_precompute_summary, print_search_result, print_sequence_score, print_verify_report,
        progress_bar,
    },
    search::Metric,
    wordlists::{load_from_file, missing_from},
};

#[derive(Parser)]
#[command(
    name = "wordle_bitset",
    about = "Find the most informative Wordle opening guesses with a bitset candidate index",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Guess vocabulary, one word per line
    #[arg(short, long, global = true, default_value = "data/guesses.txt")]
    guesses: PathBuf,

    /// Answer vocabulary, one word per line
    #[arg(short, long, global = true, default_value = "data/answers.txt")]
    answers: PathBuf,

    /// Candidate index cache; rebuilt when missing or stale
    #[arg(short, long, global = true)]
    cache: Option<PathBuf>,

    /// Worker threads (default: all cores)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Mean remaining candidates
    Average,
    /// Largest remaining candidate count
    Worst,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Average => Self::Average,
            MetricArg::Worst => Self::WorstCase,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Best single opening guess
    Best {
        #[arg(short, long, value_enum, default_value = "average")]
        metric: MetricArg,
    },

    /// Best pair of letter-disjoint opening guesses
    Pair {
        #[arg(short, long, value_enum, default_value = "average")]
        metric: MetricArg,
    },

    /// Score an explicit guess sequence
    Score {
        /// Guesses, in play order
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Write the letter-constraint catalogue as JSON
    Precompute {
        /// Output file
        #[arg(short, long, default_value = precompute::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Highest letter frequency to enumerate (default: from the answers)
        #[arg(long)]
        max_frequency: Option<usize>,
    },

    /// Cross-check the bitset, structural and database filtering paths
    Verify {
        /// Random (guess, answer) pairs to check
        #[arg(short = 'n', long, default_value = "1000")]
        samples: usize,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    let answers = load_from_file(&cli.answers).context("failed to load the answer list")?;
    let guesses = if cli.command.needs_guess_list() {
        load_guesses(&cli.guesses, &answers)?
    } else {
        Vec::new()
    };

    match cli.command {
        Commands::Best { metric } => {
            let index = build_index(&cli, &guesses, &answers);
            let result = find_best_guess(&index, metric.into(), &progress_bar("search", cli.quiet))?;
            print_search_result(&result, index.answers().len());
        }
        Commands::Pair { metric } => {
            let index = build_index(&cli, &guesses, &answers);
            let result = find_best_pair(&index, metric.into(), &progress_bar("pairs", cli.quiet))?;
            print_search_result(&result, index.answers().len());
        }
        Commands::Score { ref words } => {
            let index = build_index(&cli, &guesses, &answers);
            let score = score_guesses(&index, words)?;
            print_sequence_score(&score);
        }
        Commands::Precompute {
            ref output,
            max_frequency,
        } => {
            let config = PrecomputeConfig {
                output: output.clone(),
                max_frequency,
            };
            let summary = run_precompute(&config, &answers, &progress_bar("letters", cli.quiet))?;
            print_precompute_summary(&summary);
        }
        Commands::Verify { samples, seed } => {
            let index = build_index(&cli, &guesses, &answers);
            let report = run_verify(
                &index,
                VerifyConfig { samples, seed },
                &progress_bar("verify", cli.quiet),
            )?;
            print_verify_report(&report);
            if !report.passed() {
                anyhow::bail!("{} of {} samples disagree", report.failed, report.samples);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

impl Commands {
    /// `precompute` works from the answer list alone
    const fn needs_guess_list(&self) -> bool {
        !matches!(self, Self::Precompute { .. })
    }
}

fn load_guesses(path: &Path, answers: &[Word]) -> Result<Vec<Word>> {
    let guesses = load_from_file(path).context("failed to load the guess list")?;
    info!("{} guesses, {} answers", guesses.len(), answers.len());

    let missing = missing_from(answers, &guesses);
    if !missing.is_empty() {
        warn!(
            "{} answers are not in the guess list (first: {})",
            missing.len(),
            missing[0]
        );
    }
    Ok(guesses)
}

fn build_index(cli: &Cli, guesses: &[Word], answers: &[Word]) -> CandidateIndex {
    let progress = progress_bar("index", cli.quiet);
    progress.set_length(guesses.len() as u64);
    let index = match &cli.cache {
        Some(path) => cache::load_or_build(path, guesses, answers, &progress),
        None => CandidateIndex::build(guesses, answers, &progress),
    };
    progress.finish_and_clear();
    index
}
