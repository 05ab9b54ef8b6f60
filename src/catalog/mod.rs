//! Typed model of an Atomic Red Team style index and its YAML decoder.

mod decode;
mod error;
mod model;

pub use error::CatalogError;
pub use model::*;
