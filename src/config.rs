use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{extract::DEFAULT_FINGERPRINT_LEN, output::OutputFormat};

pub const CONFIG_FILE_NAME: &str = ".techtestrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Atomic Red Team index to read (`atomics/Indexes/index.yaml`).
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_fingerprint_length")]
    pub fingerprint_length: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_index_file() -> String {
    "example.index.yaml".to_string()
}

fn default_output_file() -> String {
    "CANDIDATE-techniques_testnumber.py".to_string()
}

fn default_fingerprint_length() -> usize {
    DEFAULT_FINGERPRINT_LEN
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            output_file: default_output_file(),
            format: OutputFormat::default(),
            fingerprint_length: default_fingerprint_length(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.fingerprint_length == 0 {
            bail!("Invalid 'fingerprintLength': must be greater than 0");
        }
        if self.index_file.is_empty() {
            bail!("Invalid 'indexFile': must not be empty");
        }
        if self.output_file.is_empty() {
            bail!("Invalid 'outputFile': must not be empty");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from; None when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
