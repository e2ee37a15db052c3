//! Configuration for the eip712-typegen command line tool.

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// CLI arguments for eip712-typegen.
#[derive(Parser, Debug)]
#[command(name = "eip712-typegen")]
#[command(about = "Generate EIP-712 types for a Cosmos transaction payload")]
pub struct CliArgs {
    /// Path to the JSON configuration file
    #[arg(long, short, env = "CONFIG")]
    pub config: Option<PathBuf>,
    /// Payload file to read; stdin when omitted
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// Number of message slots to type; counted from the payload when omitted
    #[arg(long, short)]
    pub num_messages: Option<usize>,
    /// Move the `msgs` array of a sign doc into `msg<i>` slots first
    #[arg(long)]
    pub flatten: bool,
    /// Print the schema on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Generator configuration.
///
/// Fields use serde defaults that fall back to environment variables,
/// then to hardcoded defaults. A duplicate ceiling of zero is rejected.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "config_defaults::default_max_duplicate_typedefs")]
    max_duplicate_typedefs: NonZeroUsize,
    #[serde(default = "config_defaults::default_pretty")]
    pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_duplicate_typedefs: config_defaults::default_max_duplicate_typedefs(),
            pretty: config_defaults::default_pretty(),
        }
    }
}

pub mod config_defaults {
    use std::env;
    use std::num::NonZeroUsize;

    use eip712_typegen::DEFAULT_MAX_DUPLICATES;

    pub const DEFAULT_PRETTY: bool = true;

    /// Returns the duplicate ceiling with fallback: $MAX_DUPL_TYPEDEFS env var -> 1000
    ///
    /// Zero does not parse as a ceiling and falls back like any other invalid value.
    pub fn default_max_duplicate_typedefs() -> NonZeroUsize {
        env::var("MAX_DUPL_TYPEDEFS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_DUPLICATES)
    }

    /// Returns the output style with fallback: $PRETTY env var -> true
    pub fn default_pretty() -> bool {
        env::var("PRETTY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PRETTY)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Config {
    /// Maximum number of distinct definitions per generated type name.
    pub fn max_duplicate_typedefs(&self) -> NonZeroUsize {
        self.max_duplicate_typedefs
    }

    /// Whether the schema is printed indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Load configuration from the file given on the command line.
    ///
    /// Without a config file every value is resolved via environment
    /// variables or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_owned(), e))?;
        Self::from_json(&content)
    }

    fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }
}
