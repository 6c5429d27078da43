//! Report module: human-readable results of a variant run.
//!
//! The layout is informational only; measurement lines are the machine
//! readable output.

use crate::analysis::FixtureAnalysis;
use crate::harness::RunSummary;
use crate::query::{render_value, QueryOutcome};
use std::fmt::{self, Write};

/// Longest rendered cell before it is cut off.
const MAX_CELL_WIDTH: usize = 60;

fn truncate(cell: String) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell;
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

pub fn write_analysis(out: &mut impl Write, analysis: &FixtureAnalysis) -> fmt::Result {
    let dict = &analysis.dictionary;
    writeln!(out, "\n  Dictionary analysis")?;
    writeln!(out, "  {}", "-".repeat(60))?;
    writeln!(out, "  Total words:      {:>10}", dict.words)?;
    writeln!(out, "  Total characters: {:>10}", dict.total_chars)?;
    writeln!(out, "  Average length:   {:>10.2}", dict.average_len)?;
    writeln!(out, "  Longest word:     {:>10}", dict.longest)?;
    writeln!(out, "  Shortest word:    {:>10}", dict.shortest)?;
    writeln!(out, "  Length distribution:")?;
    for (len, count) in &dict.length_distribution {
        writeln!(out, "    {len:>2} chars: {count}")?;
    }

    let patterns = &analysis.patterns;
    writeln!(out, "\n  Words by first letter:")?;
    for (i, &count) in patterns.letter_counts.iter().enumerate() {
        if count > 0 {
            writeln!(out, "    {}: {count}", (b'A' + i as u8) as char)?;
        }
    }
    if !patterns.palindromes.is_empty() {
        writeln!(out, "  Palindromes: {}", patterns.palindromes.join(", "))?;
    }

    let c = &analysis.constants;
    writeln!(out, "\n  Mathematical constants ({})", c.count)?;
    writeln!(out, "  {}", "-".repeat(60))?;
    writeln!(out, "  Sum:     {:>16.6}", c.sum)?;
    writeln!(out, "  Mean:    {:>16.6}", c.mean)?;
    writeln!(out, "  Min:     {:>16.6}", c.min)?;
    writeln!(out, "  Max:     {:>16.6}", c.max)?;
    writeln!(out, "  Std dev: {:>16.6}", c.std_dev)?;

    let p = &analysis.primes;
    writeln!(out, "\n  Primes ({})", p.count)?;
    writeln!(out, "  {}", "-".repeat(60))?;
    writeln!(out, "  Sum:     {:>16}", p.sum)?;
    writeln!(out, "  Mean:    {:>16.2}", p.mean)?;
    writeln!(out, "  Largest: {:>16}", p.largest)?;
    writeln!(out, "  Common gaps:")?;
    for (gap, count) in &p.common_gaps {
        writeln!(out, "    gap {gap:>2}: {count} occurrences")?;
    }
    Ok(())
}

pub fn write_outcome(out: &mut impl Write, outcome: &QueryOutcome) -> fmt::Result {
    writeln!(out, "\n  {}", outcome.spec.title)?;
    match &outcome.result {
        Ok(rows) => {
            writeln!(out, "  {}", rows.columns.join(" | "))?;
            writeln!(out, "  {}", "-".repeat(60))?;
            for row in &rows.rows {
                let cells: Vec<String> = row.iter().map(|v| truncate(render_value(v))).collect();
                writeln!(out, "  {}", cells.join(" | "))?;
            }
            if rows.rows.is_empty() {
                writeln!(out, "  (no rows)")?;
            }
        }
        Err(err) => writeln!(out, "  Query failed: {err}")?,
    }
    Ok(())
}

pub fn write_report(out: &mut impl Write, summary: &RunSummary) -> fmt::Result {
    writeln!(out, "\n{}", "=".repeat(80))?;
    writeln!(out, "  SQLite Benchmark Report: {}", summary.variant.name)?;
    writeln!(
        out,
        "  Workload: {} | Database: {}",
        summary.workload, summary.database
    )?;
    writeln!(out, "{}", "=".repeat(80))?;

    if let Some(analysis) = &summary.analysis {
        write_analysis(out, analysis)?;
    }
    if let Some(checksum) = summary.checksum {
        writeln!(out, "\n  Trigonometric checksum: {checksum:.6}")?;
    }

    let run = &summary.run;
    writeln!(out, "\n  Tables loaded:")?;
    writeln!(out, "  {:24} {:>10}", "Table", "Rows")?;
    writeln!(out, "  {}", "-".repeat(36))?;
    for load in &run.loads {
        writeln!(out, "  {:24} {:>10}", load.table, load.rows)?;
    }

    for (phase, message) in &run.failures {
        writeln!(out, "  Phase '{phase}' failed: {message}")?;
    }

    if run.queries_skipped {
        writeln!(out, "\n  Queries skipped: schema unavailable")?;
    } else {
        for outcome in &run.outcomes {
            write_outcome(out, outcome)?;
        }
    }

    writeln!(out, "\n{}", "=".repeat(80))?;
    writeln!(out, "\n  Summary:")?;
    writeln!(out, "  Rows inserted:   {:>10}", run.total_rows())?;
    writeln!(
        out,
        "  Queries:         {:>10}  ({} failed)",
        run.outcomes.len(),
        run.failed_queries()
    )?;
    writeln!(out, "  Started at:      {:>10} ms", summary.started)?;
    writeln!(out, "  Total time:      {:>10} ms", summary.elapsed)?;
    writeln!(out)
}

/// Print a formatted report for one variant run.
pub fn print_report(summary: &RunSummary) {
    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut text, summary);
    print!("{text}");
}
