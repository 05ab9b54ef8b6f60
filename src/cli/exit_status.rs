use std::process::ExitCode;

/// Process exit status of `techtest`.
///
/// - `Success` (0): the table was written, or the config file was created
/// - `Failure` (1): `generate --strict` hit data-quality issues (the table is
///   still written), or `init` found an existing config file
/// - `Error` (2): nothing usable was produced (missing or unparsable index,
///   invalid config, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
