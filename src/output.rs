//! Serialization of the fingerprint table.
//!
//! The default artifact is a Python module consumed by the verifier:
//!
//! ```text
//! TECHNIQUES_TESTNUMBERS = [
//!     (r"T1546.004-1",r'echo "#{command_to_add}" >> ~/.bash_profile'),
//! ]
//! ```

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::extract::TestRecord;

/// Name of the list variable in the generated Python module.
pub const TABLE_NAME: &str = "TECHNIQUES_TESTNUMBERS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Python,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Python => write!(f, "python"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render(records: &[TestRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Python => Ok(render_python(records)),
        OutputFormat::Json => render_json(records),
    }
}

pub fn write_table(path: &Path, records: &[TestRecord], format: OutputFormat) -> Result<()> {
    let content = render(records, format)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

fn render_python(records: &[TestRecord]) -> String {
    let mut out = format!("{} = [\n", TABLE_NAME);
    for record in records {
        out.push_str(&format!(
            "    ({},{}),\n",
            python_literal(&record.test_id, '"'),
            python_literal(&record.fingerprint, '\'')
        ));
    }
    out.push_str("]\n");
    out
}

fn render_json(records: &[TestRecord]) -> Result<String> {
    let pairs: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.test_id.as_str(), r.fingerprint.as_str()))
        .collect();
    let mut json = serde_json::to_string_pretty(&pairs).context("Failed to serialize table")?;
    json.push('\n');
    Ok(json)
}

/// Quote `text` as a Python string literal.
///
/// Raw literals keep command templates readable (backslashes in Windows paths
/// stay as-is). They cannot hold the quote character, line breaks, or a
/// trailing backslash, so those fall back to an escaped literal.
fn python_literal(text: &str, quote: char) -> String {
    let raw_safe = !text.contains(quote)
        && !text.contains(['\n', '\r'])
        && !text.ends_with('\\');
    if raw_safe {
        return format!("r{quote}{text}{quote}");
    }

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
