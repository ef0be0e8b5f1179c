//! Generator configuration, read from TOML.
//!
//! ```toml
//! [retrieval]
//! max_attempts = 5
//! delay_ms = 100
//!
//! [eligibility]
//! mutation_types = ["MI:0118", "MI:0119", "MI:0382", "MI:0573"]
//! ```
//!
//! Missing sections fall back to their defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eligibility::EligibilitySet;
use crate::provider::RetryPolicy;

/// Ontology ids look like `MI:0118`.
const TERM_ID_PATTERN: &str = r"^[A-Za-z]+:\d+$";

/// PSI-MI mutation feature types accepted when no config is given.
const DEFAULT_MUTATION_TYPES: [&str; 10] = [
    "MI:0118", "MI:0119", "MI:0382", "MI:0573", "MI:1128", "MI:1129", "MI:1130", "MI:1131",
    "MI:1132", "MI:1133",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid ontology term id: {0}")]
    InvalidTermId(String),
    #[error("retrieval.max_attempts must be at least 1")]
    InvalidAttempts,
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub max_attempts: u32,
    /// Backoff step between attempts, in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub mutation_types: Vec<String>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            mutation_types: DEFAULT_MUTATION_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub retrieval: RetrievalConfig,
    pub eligibility: EligibilityConfig,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.max_attempts == 0 {
            return Err(ConfigError::InvalidAttempts);
        }
        let pattern = Regex::new(TERM_ID_PATTERN)?;
        if let Some(bad) = self
            .eligibility
            .mutation_types
            .iter()
            .find(|term| !pattern.is_match(term))
        {
            return Err(ConfigError::InvalidTermId(bad.clone()));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retrieval.max_attempts)
            .with_delay(Duration::from_millis(self.retrieval.delay_ms))
    }

    pub fn eligibility_set(&self) -> EligibilitySet {
        EligibilitySet::new(self.eligibility.mutation_types.iter().cloned())
    }
}
