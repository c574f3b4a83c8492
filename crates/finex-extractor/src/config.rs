//! Configuration for the analysis pipeline

use finex_domain::relevance::{DEFAULT_KEYWORDS, DEFAULT_MIN_MATCHES};
use finex_domain::RelevanceHeuristic;
use serde::{Deserialize, Serialize};

/// Configuration for the Pipeline
///
/// Only the relevance heuristic is tunable; the prompt and generation settings
/// are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Keywords for the relevance heuristic (case-insensitive)
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Distinct keywords required to treat a document as financial
    #[serde(default = "default_min_keyword_matches")]
    pub min_keyword_matches: usize,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let heuristic = self.heuristic();
        if heuristic.keywords().is_empty() {
            return Err("keywords must contain at least one non-blank entry".to_string());
        }
        if self.min_keyword_matches == 0 {
            return Err("min_keyword_matches must be greater than 0".to_string());
        }
        if self.min_keyword_matches > heuristic.keywords().len() {
            return Err(format!(
                "min_keyword_matches ({}) cannot exceed the number of distinct keywords ({})",
                self.min_keyword_matches,
                heuristic.keywords().len()
            ));
        }
        Ok(())
    }

    /// Build the relevance heuristic described by this configuration
    pub fn heuristic(&self) -> RelevanceHeuristic {
        RelevanceHeuristic::new(&self.keywords, self.min_keyword_matches)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            min_keyword_matches: default_min_keyword_matches(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_min_keyword_matches() -> usize {
    DEFAULT_MIN_MATCHES
}
