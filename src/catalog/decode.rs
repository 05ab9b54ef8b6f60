//! Lowering of a YAML index into the typed [`Catalog`] model.
//!
//! The index is a stream of one or more documents, each shaped as
//! `category -> technique -> { technique: <metadata>, atomic_tests: [...] }`.
//! Shape problems above the technique level are fatal; shape problems inside
//! a technique entry become [`TechniqueBlock::Malformed`].

use std::{fs, path::Path};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use super::{
    BlockDefect, Catalog, CatalogError, Category, InvalidTestCase, Technique, TechniqueBlock,
    TestCase,
};

/// Keys containing this marker hold technique metadata rather than tests.
const METADATA_KEY: &str = "technique";

impl Catalog {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Decode every document of a YAML stream, concatenating their categories.
    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
            let value = Value::deserialize(document)?;
            let categories = decode_document(index + 1, &value)?;
            debug!(
                "Decoded document {} ({} categories)",
                index + 1,
                categories.len()
            );
            catalog.categories.extend(categories);
        }

        Ok(catalog)
    }
}

impl TechniqueBlock {
    pub fn from_value(value: &Value) -> Self {
        match split_block(value) {
            Ok((metadata, test_cases)) => TechniqueBlock::WellFormed {
                metadata,
                test_cases,
            },
            Err(defect) => TechniqueBlock::Malformed(defect),
        }
    }
}

fn decode_document(document: usize, value: &Value) -> Result<Vec<Category>, CatalogError> {
    let mapping = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(CatalogError::DocumentNotMapping { document }),
    };

    mapping
        .iter()
        .map(|(key, value)| {
            let name = key_str(key, || format!("document {}", document))?;
            decode_category(name, value)
        })
        .collect()
}

fn decode_category(name: &str, value: &Value) -> Result<Category, CatalogError> {
    let techniques = match value {
        // `category:` with nothing under it
        Value::Null => Vec::new(),
        Value::Mapping(mapping) => mapping
            .iter()
            .map(|(key, value)| {
                let id = key_str(key, || format!("category \"{}\"", name))?;
                Ok(Technique {
                    id: id.to_string(),
                    block: TechniqueBlock::from_value(value),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?,
        _ => {
            return Err(CatalogError::CategoryNotMapping {
                category: name.to_string(),
            });
        }
    };

    Ok(Category {
        name: name.to_string(),
        techniques,
    })
}

fn key_str(key: &Value, location: impl FnOnce() -> String) -> Result<&str, CatalogError> {
    key.as_str().ok_or_else(|| CatalogError::NonStringKey {
        key: format!("{:?}", key),
        location: location(),
    })
}

type TestList = Vec<Result<TestCase, InvalidTestCase>>;

fn split_block(value: &Value) -> Result<(Value, TestList), BlockDefect> {
    let Value::Mapping(mapping) = value else {
        return Err(BlockDefect::NotAMapping);
    };

    let mut metadata = None;
    let mut lists: Vec<(&str, &Value)> = Vec::new();

    for (key, value) in mapping {
        let key = key.as_str().ok_or(BlockDefect::NonStringKey)?;
        if key.contains(METADATA_KEY) {
            metadata.get_or_insert_with(|| value.clone());
        } else {
            lists.push((key, value));
        }
    }

    let metadata = metadata.ok_or(BlockDefect::MissingMetadata)?;

    let (list_key, list) = match lists.as_slice() {
        [] => return Err(BlockDefect::MissingTestList),
        [single] => *single,
        _ => {
            return Err(BlockDefect::MultipleTestLists(
                lists.iter().map(|(key, _)| key.to_string()).collect(),
            ));
        }
    };

    let Value::Sequence(items) = list else {
        return Err(BlockDefect::NotASequence(list_key.to_string()));
    };

    Ok((metadata, items.iter().map(decode_test_case).collect()))
}

fn decode_test_case(item: &Value) -> Result<TestCase, InvalidTestCase> {
    serde_yaml::from_value(item.clone()).map_err(|err| InvalidTestCase {
        named: item.get("name").is_some_and(|name| !name.is_null()),
        message: err.to_string(),
    })
}
