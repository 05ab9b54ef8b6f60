//! Catalog decoding errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a catalog from being decoded at all.
///
/// Problems inside a single technique never surface here; they are carried
/// as [`BlockDefect`](super::BlockDefect) values and reported by the extractor.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document {document} is not a mapping of categories")]
    DocumentNotMapping { document: usize },

    #[error("category \"{category}\" is not a mapping of techniques")]
    CategoryNotMapping { category: String },

    #[error("non-string key {key} in {location}")]
    NonStringKey { key: String, location: String },
}
