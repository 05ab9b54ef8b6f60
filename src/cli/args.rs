//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Parse an index file and write the fingerprint table
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct GenerateArgs {
    /// Path to the index.yaml file to parse (overrides config file)
    #[arg(short, long)]
    pub index_file: Option<PathBuf>,

    /// Path of the table file to write (overrides config file)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Logging level: DEBUG, INFO, WARNING, ERROR or CRITICAL (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum number of characters kept from each command line (overrides config file)
    #[arg(long)]
    pub fingerprint_length: Option<usize>,

    /// Exit with status 1 when the index has data-quality issues
    #[arg(long)]
    pub strict: bool,

    /// Log every category, technique and test while parsing
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an Atomic Red Team index and write the test fingerprint table
    Generate(GenerateCommand),
    /// Initialize a new .techtestrc.json configuration file
    Init,
}
