//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use plotboard_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_endpoint() -> String {
    plotboard_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

/// CLI configuration, stored at `~/.plotboard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Generation service endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name; must be configured before extraction can run
    #[serde(default)]
    pub model: Option<String>,

    /// Extraction pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: None,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".plotboard").join("config.toml"))
    }

    /// Load configuration from file, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the model name, preferring a CLI override.
    ///
    /// A missing model is a configuration error and is reported before any
    /// network call is made.
    pub fn resolve_model(&self, override_model: Option<&str>) -> Result<String> {
        override_model
            .map(str::to_string)
            .or_else(|| self.model.clone())
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config(
                    "No model configured. Set `model` in ~/.plotboard/config.toml or pass --model"
                        .into(),
                )
            })
    }
}
