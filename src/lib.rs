//! Techtest - fingerprint table generator for Atomic Red Team indexes
//!
//! Techtest reads the Atomic Red Team `index.yaml`, numbers every test of every
//! technique, and writes a lookup table of `(test id, command fingerprint)`
//! pairs that a verifier matches against command-line telemetry.
//!
//! ## Module Structure
//!
//! - `catalog`: Typed index model and YAML decoding
//! - `extract`: Index traversal, test numbering and fingerprinting
//! - `output`: Serialization of the lookup table
//! - `config`: Configuration file loading and parsing
//! - `logging`: Tracing subscriber setup
//! - `cli`: Command-line interface layer

pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod output;
