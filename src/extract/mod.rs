//! Catalog traversal that produces the `(test id, fingerprint)` table.
//!
//! The traversal visits categories, techniques and test cases in input order,
//! numbering named tests per technique. Data-quality problems never stop the
//! walk; they are collected as [`Diagnostic`]s next to the records.

mod fingerprint;

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

pub use fingerprint::{DEFAULT_FINGERPRINT_LEN, fingerprint};

use crate::catalog::{BlockDefect, Catalog, InvalidTestCase, TechniqueBlock, TestCase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub fingerprint_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fingerprint_len: DEFAULT_FINGERPRINT_LEN,
        }
    }
}

/// One row of the lookup table, e.g. `("T1546.004-1", "echo ... >> ~/.bashrc")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    pub test_id: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub techniques: usize,
    /// Every test case seen in a well-formed technique block.
    pub test_cases: usize,
    /// Named test cases with a command, i.e. one per emitted record.
    pub implemented_tests: usize,
    /// Test cases without a usable command.
    pub manual_tests: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingName,
    MissingExecutor,
    MissingCommand,
    InvalidTestCase(InvalidTestCase),
    MalformedTechniqueBlock(BlockDefect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub category: String,
    pub technique: String,
    /// 1-based position in the technique's test list.
    /// None for technique-level problems.
    pub position: Option<usize>,
    pub test_name: Option<String>,
}

impl Diagnostic {
    pub fn is_malformed_block(&self) -> bool {
        matches!(self.kind, DiagnosticKind::MalformedTechniqueBlock(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingName => write!(f, "no name found for this test")?,
            DiagnosticKind::MissingExecutor => write!(f, "no executor found for this test")?,
            DiagnosticKind::MissingCommand => write!(
                f,
                "no command line found for this test (manual test procedure?)"
            )?,
            DiagnosticKind::InvalidTestCase(invalid) => write!(f, "{}", invalid)?,
            DiagnosticKind::MalformedTechniqueBlock(defect) => {
                write!(f, "{}, technique skipped", defect)?
            }
        }

        write!(f, " [{} / {}", self.category, self.technique)?;
        if let Some(position) = self.position {
            write!(f, " #{}", position)?;
        }
        if let Some(name) = &self.test_name {
            write!(f, " \"{}\"", name)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<TestRecord>,
    pub stats: Statistics,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk the catalog and build the fingerprint table.
///
/// A record is emitted only for test cases that have both a name and a
/// command; the id is `{technique}-{n}` where `n` counts the named test cases
/// of the technique so far. Named manual tests still consume a number, which
/// keeps ids aligned with the catalog's own test numbering.
pub fn extract(catalog: &Catalog, options: &ExtractOptions) -> Extraction {
    let mut extraction = Extraction::default();

    for category in &catalog.categories {
        debug!("Category: {}", category.name);

        for technique in &category.techniques {
            debug!("  Technique: {}", technique.id);
            extraction.stats.techniques += 1;

            let test_cases = match &technique.block {
                TechniqueBlock::WellFormed { test_cases, .. } => test_cases,
                TechniqueBlock::Malformed(defect) => {
                    extraction.diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::MalformedTechniqueBlock(defect.clone()),
                        category: category.name.clone(),
                        technique: technique.id.clone(),
                        position: None,
                        test_name: None,
                    });
                    continue;
                }
            };

            let mut walker = TechniqueWalker {
                category: &category.name,
                technique: &technique.id,
                options,
                index: 0,
                extraction: &mut extraction,
            };
            for (i, entry) in test_cases.iter().enumerate() {
                match entry {
                    Ok(test_case) => walker.visit(i + 1, test_case),
                    Err(invalid) => walker.skip_invalid(i + 1, invalid),
                }
            }
        }
    }

    extraction
}

/// Per-technique traversal state; `index` restarts at zero for each technique.
struct TechniqueWalker<'a> {
    category: &'a str,
    technique: &'a str,
    options: &'a ExtractOptions,
    index: usize,
    extraction: &'a mut Extraction,
}

impl TechniqueWalker<'_> {
    fn visit(&mut self, position: usize, test_case: &TestCase) {
        self.extraction.stats.test_cases += 1;

        let name = test_case.name();
        if name.is_none() {
            self.report(DiagnosticKind::MissingName, position, None);
        }

        let command = match &test_case.executor {
            None => {
                self.report(DiagnosticKind::MissingExecutor, position, name);
                None
            }
            Some(executor) => {
                let command = executor.command();
                if command.is_none() {
                    self.report(DiagnosticKind::MissingCommand, position, name);
                }
                command
            }
        };

        if command.is_none() {
            self.extraction.stats.manual_tests += 1;
        }

        let Some(name) = name else {
            return;
        };
        trace!(
            "    name: {} (executor: {})",
            name,
            test_case
                .executor
                .as_ref()
                .and_then(|executor| executor.name.as_deref())
                .unwrap_or("-")
        );
        self.index += 1;

        let Some(command) = command else {
            trace!("    command line: None found.");
            return;
        };
        self.extraction.stats.implemented_tests += 1;
        let fingerprint = fingerprint(command, self.options.fingerprint_len);
        trace!("    command line: {}", fingerprint);

        self.extraction.records.push(TestRecord {
            test_id: format!("{}-{}", self.technique, self.index),
            fingerprint: fingerprint.to_string(),
        });
    }

    /// An undecodable entry yields no record. A named one still takes its number.
    fn skip_invalid(&mut self, position: usize, invalid: &InvalidTestCase) {
        self.extraction.stats.test_cases += 1;
        if invalid.named {
            self.index += 1;
        }
        self.report(DiagnosticKind::InvalidTestCase(invalid.clone()), position, None);
    }

    fn report(&mut self, kind: DiagnosticKind, position: usize, test_name: Option<&str>) {
        self.extraction.diagnostics.push(Diagnostic {
            kind,
            category: self.category.to_string(),
            technique: self.technique.to_string(),
            position: Some(position),
            test_name: test_name.map(str::to_string),
        });
    }
}
