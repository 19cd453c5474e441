//! Per-invocation configuration
//!
//! One `Config` is built from the command line (or REST wiring) per
//! invocation and passed down by parameter. The library reads no globals
//! and no environment.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::KeyError;

/// Bech32 human-readable parts for the three prefix families
///
/// Defaults to the cosmos-compatible set; deployments targeting another
/// network override these per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Prefixes {
    pub account: String,
    pub account_pub: String,
    pub validator: String,
    pub validator_pub: String,
    pub consensus: String,
    pub consensus_pub: String,
}

impl Default for Bech32Prefixes {
    fn default() -> Self {
        Self {
            account: "cosmos".to_string(),
            account_pub: "cosmospub".to_string(),
            validator: "cosmosvaloper".to_string(),
            validator_pub: "cosmosvaloperpub".to_string(),
            consensus: "cosmosvalcons".to_string(),
            consensus_pub: "cosmosvalconspub".to_string(),
        }
    }
}

/// Rendering mode for key output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(KeyError::Store(format!(
                "invalid output format: {} (expected text or json)",
                s
            ))),
        }
    }
}

/// Configuration for one command invocation
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Keybase home directory
    pub home: PathBuf,
    /// Output rendering mode
    pub output: OutputFormat,
    /// Bech32 prefix families for address rendering
    pub bech32: Bech32Prefixes,
}

impl Config {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}
