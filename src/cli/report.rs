//! Summary printing for CLI commands.
//!
//! Kept apart from the commands so techtest can be used as a library
//! without writing to the terminal.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, GenerateSummary, InitSummary};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Generate(summary) => {
            print_generate_to(summary, &mut io::stdout().lock());
            print_issue_warning_to(summary, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

pub fn print_generate_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} to {} ({})",
            summary.record_count,
            plural(summary.record_count, "fingerprint", "fingerprints"),
            summary.output_file.display(),
            summary.format
        )
        .green()
    );

    let stats = &summary.stats;
    let rows = [
        ("Techniques found", stats.techniques),
        ("Test cases found", stats.test_cases),
        ("Implemented test cases found", stats.implemented_tests),
        ("Manual only test cases found", stats.manual_tests),
    ];
    for (label, value) in rows {
        let _ = writeln!(writer, "  {:>28}: {}", label, value);
    }
}

pub fn print_issue_warning_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let total = summary.warning_count + summary.skipped_techniques;
    if total == 0 {
        return;
    }

    let (label, mark) = if summary.is_strict {
        ("error:".bold().red(), format!("{} ", FAILURE_MARK.red()))
    } else {
        ("warning:".bold().yellow(), String::new())
    };

    let _ = writeln!(
        writer,
        "{}{} {} data-quality {} in {} ({} skipped {}; use {} for details)",
        mark,
        label,
        total,
        plural(total, "issue", "issues"),
        summary.index_file.display(),
        summary.skipped_techniques,
        plural(summary.skipped_techniques, "technique", "techniques"),
        "-l WARNING".cyan()
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        );
    } else {
        eprintln!("Error: {} already exists", summary.path.display());
    }
}
