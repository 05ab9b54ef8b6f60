//! Tracing subscriber setup.
//!
//! Levels use the names of the index tooling (`DEBUG`, `INFO`, `WARNING`,
//! `ERROR`, `CRITICAL`). `RUST_LOG`, when set, wins over everything else.

use std::{
    fmt,
    io::{self, IsTerminal},
};

use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Case-insensitive lookup; `WARN` is accepted as an alias of `WARNING`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" | "WARN" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Resolve a user-supplied level, falling back to `ERROR` with a notice.
    pub fn resolve(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            eprintln!(
                "{} invalid log level \"{}\", defaulting to {}",
                "warning:".bold().yellow(),
                name,
                Self::Error
            );
            Self::Error
        })
    }

    fn directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            // tracing has no level above error
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

fn env_filter(level: LogLevel, verbose: bool) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("techtest=trace")
    } else {
        EnvFilter::new(format!("techtest={}", level.directive()))
    }
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init(level: LogLevel, verbose: bool) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, verbose))
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init()
        .is_ok();

    if installed {
        debug!("Logging initialized (level={}, verbose={})", level, verbose);
    }
}
