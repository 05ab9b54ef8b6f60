use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use super::super::args::{GenerateArgs, GenerateCommand};
use super::{CommandResult, CommandSummary, GenerateSummary};
use crate::{
    catalog::Catalog,
    config::{CONFIG_FILE_NAME, Config, load_config},
    extract::{ExtractOptions, extract},
    logging::{self, LogLevel},
    output::write_table,
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let loaded = load_config(&cwd)?;
    let config = apply_overrides(loaded.config, args);

    logging::init(LogLevel::resolve(&config.log_level), args.verbose);
    match &loaded.path {
        Some(path) => info!("Using configuration from {}", path.display()),
        None => info!("No {} found, using defaults", CONFIG_FILE_NAME),
    }
    config.validate()?;

    let index_file = PathBuf::from(&config.index_file);
    let output_file = PathBuf::from(&config.output_file);
    if !index_file.is_file() {
        bail!("Index file not found: {}", index_file.display());
    }

    info!("Beginning to parse {}", index_file.display());
    let catalog = Catalog::from_path(&index_file)
        .with_context(|| format!("Failed to load index file: {}", index_file.display()))?;

    let extraction = extract(
        &catalog,
        &ExtractOptions {
            fingerprint_len: config.fingerprint_length,
        },
    );

    let mut skipped_techniques = 0;
    for diagnostic in &extraction.diagnostics {
        if diagnostic.is_malformed_block() {
            skipped_techniques += 1;
            error!("{}", diagnostic);
        } else {
            warn!("{}", diagnostic);
        }
    }

    write_table(&output_file, &extraction.records, config.format)?;

    let stats = extraction.stats;
    info!("            Techniques found: {}", stats.techniques);
    info!("Implemented test cases found: {}", stats.implemented_tests);
    info!("Manual only test cases found: {}", stats.manual_tests);
    info!("Finished writing {}", output_file.display());

    let error_count = extraction.diagnostics.len();
    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            index_file,
            output_file,
            format: config.format,
            record_count: extraction.records.len(),
            stats,
            warning_count: error_count - skipped_techniques,
            skipped_techniques,
            is_strict: args.strict,
        }),
        error_count,
        exit_on_errors: args.strict,
    })
}

/// Command-line values win over the configuration file.
fn apply_overrides(mut config: Config, args: &GenerateArgs) -> Config {
    if let Some(index_file) = &args.index_file {
        config.index_file = index_file.to_string_lossy().into_owned();
    }
    if let Some(output_file) = &args.output_file {
        config.output_file = output_file.to_string_lossy().into_owned();
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(length) = args.fingerprint_length {
        config.fingerprint_length = length;
    }
    config
}
