//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Serialized manuscript length (characters) above which the run is
    /// split into chunked requests
    pub size_threshold_chars: usize,

    /// Number of sections per chunk on the chunked path
    pub chunk_group_size: usize,

    /// Generation budget (tokens) declared to the service per request
    pub generation_budget_tokens: u32,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.size_threshold_chars == 0 {
            return Err("size_threshold_chars must be greater than 0".to_string());
        }
        if self.chunk_group_size == 0 {
            return Err("chunk_group_size must be greater than 0".to_string());
        }
        if self.generation_budget_tokens == 0 {
            return Err("generation_budget_tokens must be greater than 0".to_string());
        }
        Ok(())
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

impl Default for ExtractorConfig {
    /// Defaults sized for a service that handles roughly 6k tokens of input
    fn default() -> Self {
        Self {
            size_threshold_chars: 24_000,
            chunk_group_size: 4,
            generation_budget_tokens: 4_096,
        }
    }
}
