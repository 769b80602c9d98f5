//! Display functions for command results

use super::formatters::{create_bar, format_bytes, format_score, join_upper};
use crate::commands::{PrecomputeSummary, SequenceScore, VerifyReport};
use crate::search::{Metric, SearchResult};
use colored::Colorize;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the winner of a best-guess or best-pair search
pub fn print_search_result(result: &SearchResult, total_answers: usize) {
    let title = if result.words.len() == 1 {
        "BEST GUESS"
    } else {
        "BEST PAIR"
    };
    header(title);

    println!(
        "\n🎯 {}",
        join_upper(&result.words).bright_yellow().bold()
    );
    println!(
        "   Score:       {} ({})",
        format_score(result.score, result.metric).green(),
        result.metric
    );
    println!("   Answers:     {total_answers}");
    println!("   Evaluated:   {}", result.evaluated);
    if result.skipped > 0 {
        println!("   Pruned:      {}", result.skipped);
    }
    println!("   Time taken:  {:.2}s", result.elapsed.as_secs_f64());
}

/// Print the score of an explicit guess sequence
pub fn print_sequence_score(score: &SequenceScore) {
    header("SEQUENCE SCORE");

    for (turn, guess) in score.guesses.iter().enumerate() {
        println!(
            "\nTurn {}: {}  {} buckets, largest {}",
            turn + 1,
            guess.word.text().to_uppercase().bright_yellow().bold(),
            guess.buckets,
            guess.largest_bucket
        );
        for (feedback, size) in &guess.top_buckets {
            let bar = create_bar(*size as f64, score.total_answers as f64, 30);
            println!("   {feedback} [{}] {size}", bar.green());
        }
    }

    println!("\n📊 Against {} possible answers:", score.total_answers);
    println!(
        "   Average:     {}",
        format_score(score.average, Metric::Average).bright_yellow()
    );
    let worst = score
        .worst_case
        .map_or(f64::INFINITY, |w| w as f64);
    println!(
        "   Worst case:  {}",
        format_score(worst, Metric::WorstCase).yellow()
    );
}

/// Print what a precomputation run produced
pub fn print_precompute_summary(summary: &PrecomputeSummary) {
    header("CONSTRAINT CATALOGUE");

    println!(
        "\n✓ Wrote {} descriptors to {} ({})",
        summary.descriptors.to_string().bright_yellow().bold(),
        summary.output.display(),
        format_bytes(summary.bytes)
    );
    println!(
        "   Word length {}, frequency cap {}",
        summary.config.word_length, summary.config.max_frequency
    );

    println!("\n📈 {}", "Frequency distribution:".bright_cyan().bold());
    for (frequency, count) in summary.stats.by_frequency.iter().enumerate() {
        let bar = create_bar(*count as f64, summary.descriptors as f64, 30);
        println!("   {frequency}: {} {count:5}", bar.green());
    }
    println!("   Exact frequency:  {}", summary.stats.exact);
    println!("   Lower bound:      {}", summary.stats.lower_bound);

    println!(
        "\n🧮 {} letter bitsets over the answers, {} non-empty",
        summary.bitsets, summary.non_empty
    );
}

/// Print a cross-validation report
pub fn print_verify_report(report: &VerifyReport) {
    header("PATH CROSS-CHECK");

    println!("\n   Samples:        {}", report.samples);
    println!("   Agreed:         {}", report.agreed.to_string().green());
    println!("   Mean remaining: {:.2}", report.mean_remaining);
    println!("   Time taken:     {:.2}s", report.duration.as_secs_f64());

    if report.passed() {
        println!("\n{}", "✅ All filtering paths agree".green().bold());
        return;
    }

    println!(
        "\n{}",
        format!("❌ {} samples disagree", report.failed).red().bold()
    );
    for m in &report.mismatches {
        println!(
            "   {} vs {} {}: bitset {}, structural {}, database {}",
            m.guess.to_uppercase(),
            m.answer.to_uppercase(),
            m.feedback,
            m.bitset,
            m.structural,
            m.database.map_or_else(|| "-".to_string(), |d| d.to_string())
        );
    }
}
