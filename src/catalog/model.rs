use serde::{Deserialize, Deserializer, de};
use serde_yaml::Value;
use thiserror::Error;

/// A fully decoded test catalog, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

/// A tactic / platform grouping of techniques (e.g. `defense-evasion`).
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub techniques: Vec<Technique>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    /// External taxonomy identifier, e.g. `T1546.004`.
    pub id: String,
    pub block: TechniqueBlock,
}

/// The body of a technique entry.
///
/// A well-formed block has exactly one metadata entry and one test list.
/// Anything else is kept as `Malformed` so traversal can report it and move on.
#[derive(Debug, Clone, PartialEq)]
pub enum TechniqueBlock {
    WellFormed {
        metadata: Value,
        /// Test cases in list order; entries that could not be decoded keep
        /// their slot so positions and numbering stay aligned.
        test_cases: Vec<Result<TestCase, InvalidTestCase>>,
    },
    Malformed(BlockDefect),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockDefect {
    #[error("technique entry is not a mapping")]
    NotAMapping,

    #[error("technique entry has no metadata key")]
    MissingMetadata,

    #[error("technique entry has no test list")]
    MissingTestList,

    #[error("technique entry has several test lists: {}", .0.join(", "))]
    MultipleTestLists(Vec<String>),

    #[error("test list \"{0}\" is not a sequence")]
    NotASequence(String),

    #[error("technique entry has a non-string key")]
    NonStringKey,
}

/// A test list entry that does not have the shape of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test case could not be decoded: {message}")]
pub struct InvalidTestCase {
    /// Whether the entry still carries a non-null `name`.
    pub named: bool,
    pub message: String,
}

/// One executable (or manual) procedure of a technique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub executor: Option<Executor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Executor {
    /// Interpreter name such as `sh`, `powershell` or `manual`.
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub command: Option<String>,
}

impl TestCase {
    /// The test name, treating an empty string as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl Executor {
    /// The command template, treating an empty string as absent.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref().filter(|command| !command.is_empty())
    }
}

/// Accept any YAML scalar as text, so `name: 42` reads as `"42"`.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Sequence(_) => Err(de::Error::custom("expected a scalar, found a sequence")),
        Value::Mapping(_) => Err(de::Error::custom("expected a scalar, found a mapping")),
        Value::Tagged(tagged) => Err(de::Error::custom(format!(
            "expected a scalar, found a value tagged {}",
            tagged.tag
        ))),
    }
}
