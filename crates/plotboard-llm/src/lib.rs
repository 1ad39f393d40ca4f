//! Plotboard Generation Provider Layer
//!
//! Implementations of the `TextGenerator` trait from `plotboard-domain`.
//! The extraction pipeline treats the generation service as a black box:
//! prompt and token budget in, text plus a cut-short flag out.
//!
//! # Providers
//!
//! - `MockGenerator`: deterministic, scriptable mock for testing
//! - `OllamaGenerator`: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use plotboard_llm::MockGenerator;
//! use plotboard_domain::TextGenerator;
//!
//! let generator = MockGenerator::new("[]");
//! let generation = generator.generate("prompt", 4096).unwrap();
//! assert_eq!(generation.text, "[]");
//! assert!(!generation.truncated);
//! ```

#![warn(missing_docs)]

pub mod ollama;

use plotboard_domain::{Generation, TextGenerator};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaGenerator;

/// Errors that can occur while talking to a generation service
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response did not match the service's wire format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Requested model is not available on the service
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Generation error: {0}")]
    Other(String),
}

/// One scripted reply for the mock generator
#[derive(Debug, Clone)]
enum ScriptedCall {
    /// Respond with text and a truncation flag
    Respond { text: String, truncated: bool },
    /// Fail with an error message
    Fail(String),
}

/// Mock generator for deterministic testing
///
/// Returns scripted replies in order, falling back to a fixed default once
/// the script runs out. No network calls are made. Clones share state, so a
/// test can keep a handle for assertions while the pipeline owns another.
///
/// # Examples
///
/// ```
/// use plotboard_llm::MockGenerator;
/// use plotboard_domain::TextGenerator;
///
/// let generator = MockGenerator::new("default");
/// generator.push_response("first");
/// generator.push_truncated("second, cut off");
///
/// assert_eq!(generator.generate("p", 100).unwrap().text, "first");
/// assert!(generator.generate("p", 100).unwrap().truncated);
/// assert_eq!(generator.generate("p", 100).unwrap().text, "default");
/// assert_eq!(generator.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_response: String,
    script: Arc<Mutex<VecDeque<ScriptedCall>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Create a mock that answers every call with a fixed, complete response
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a complete (not truncated) response for the next unscripted call
    pub fn push_response(&self, text: impl Into<String>) {
        self.script.lock().unwrap().push_back(ScriptedCall::Respond {
            text: text.into(),
            truncated: false,
        });
    }

    /// Queue a response flagged as cut short by the generation budget
    pub fn push_truncated(&self, text: impl Into<String>) {
        self.script.lock().unwrap().push_back(ScriptedCall::Respond {
            text: text.into(),
            truncated: true,
        });
    }

    /// Queue a transport failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedCall::Fail(message.into()));
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl TextGenerator for MockGenerator {
    type Error = GeneratorError;

    fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<Generation, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedCall::Respond { text, truncated }) => Ok(Generation { text, truncated }),
            Some(ScriptedCall::Fail(message)) => Err(GeneratorError::Communication(message)),
            None => Ok(Generation {
                text: self.default_response.clone(),
                truncated: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_response() {
        let generator = MockGenerator::new("Test response");
        let generation = generator.generate("any prompt", 100).unwrap();
        assert_eq!(generation.text, "Test response");
        assert!(!generation.truncated);
    }

    #[test]
    fn test_mock_scripted_responses_in_order() {
        let generator = MockGenerator::new("default");
        generator.push_response("one");
        generator.push_response("two");

        assert_eq!(generator.generate("p", 100).unwrap().text, "one");
        assert_eq!(generator.generate("p", 100).unwrap().text, "two");
        assert_eq!(generator.generate("p", 100).unwrap().text, "default");
    }

    #[test]
    fn test_mock_truncated_response() {
        let generator = MockGenerator::default();
        generator.push_truncated("partial output");

        let generation = generator.generate("p", 100).unwrap();
        assert!(generation.truncated);
        assert_eq!(generation.text, "partial output");
    }

    #[test]
    fn test_mock_scripted_error() {
        let generator = MockGenerator::default();
        generator.push_error("connection refused");

        let result = generator.generate("p", 100);
        assert!(matches!(result, Err(GeneratorError::Communication(_))));
    }

    #[test]
    fn test_mock_records_prompts() {
        let generator = MockGenerator::default();
        generator.generate("first prompt", 100).unwrap();
        generator.generate("second prompt", 100).unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.prompts()[1], "second prompt");
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let generator = MockGenerator::new("test");
        let handle = generator.clone();

        generator.generate("p", 100).unwrap();

        assert_eq!(handle.call_count(), 1);
    }
}
