//! Command-line interface layer.
//!
//! Parsing lives in `args`, dispatch in `run`, and all terminal output in
//! `report`, so the library modules stay free of presentation concerns.

use anyhow::Result;

mod args;
mod commands;
mod exit_code;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, GenerateArgs, GenerateCommand};
pub use exit_status::ExitStatus;

use exit_code::exit_status_from_result;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(exit_status_from_result(&result))
}
