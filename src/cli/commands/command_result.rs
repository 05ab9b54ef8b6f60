use std::path::PathBuf;

use crate::{extract::Statistics, output::OutputFormat};

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub index_file: PathBuf,
    pub output_file: PathBuf,
    pub format: OutputFormat,
    pub record_count: usize,
    pub stats: Statistics,
    /// Per-test issues (missing name, executor or command).
    pub warning_count: usize,
    /// Techniques skipped because their entry could not be read.
    pub skipped_techniques: usize,
    pub is_strict: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    pub created: bool,
}

/// Result of running a techtest command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, problems are reported but the command still succeeds.
    pub exit_on_errors: bool,
}
