//! Ollama Generator Implementation
//!
//! Integration with Ollama's local LLM API. The generation budget is passed
//! through as `num_predict`, and a `done_reason` of `"length"` in the reply
//! maps to the contract's cut-short flag.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//!
//! # Examples
//!
//! ```no_run
//! use plotboard_llm::OllamaGenerator;
//!
//! let generator = OllamaGenerator::new("http://localhost:11434", "llama3");
//! ```

use crate::GeneratorError;
use plotboard_domain::{Generation, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for generation requests (120 seconds; extraction prompts
/// carry whole manuscript chunks)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API generator for local inference
pub struct OllamaGenerator {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Generation options; num_predict is the token budget
#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
    #[serde(default)]
    done_reason: Option<String>,
}

impl OllamaGenerator {
    /// Create a new Ollama generator
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a generator against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate text for a prompt, bounded by `max_tokens`
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is unreachable, the model is missing, or
    /// the response body does not parse.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Generation, GeneratorError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                num_predict: max_tokens,
            },
        };

        // Retry with exponential backoff: 1s, 2s, 4s, ...
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(body) => Ok(Generation {
                                text: body.response,
                                truncated: body.done_reason.as_deref() == Some("length"),
                            }),
                            Err(e) => Err(GeneratorError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(GeneratorError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(GeneratorError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(GeneratorError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| GeneratorError::Communication("Max retries exceeded".to_string())))
    }
}

impl TextGenerator for OllamaGenerator {
    type Error = GeneratorError;

    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Generation, Self::Error> {
        // Blocking wrapper for the async client; the pipeline calls this
        // through spawn_blocking
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.generate(prompt, max_tokens).await })
    }
}
