//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur during an extraction run
///
/// Per-chunk failures (`Service`, `Protocol`, `MalformedResponse`) are
/// caught by the orchestrator, logged, and the run continues; only total
/// failure or a failed preflight is surfaced to the caller.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Transport or auth failure talking to the generation service
    #[error("Service error: {0}")]
    Service(String),

    /// The service response carried no usable text at all
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Response could not be parsed, even after salvage
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Every chunk was attempted and nothing was produced
    #[error("Extraction produced no entities")]
    EmptyResult,

    /// Preconditions not met; checked before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The run was cancelled between chunk calls
    #[error("Extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    /// Whether this failure is local to one chunk rather than the whole run
    pub fn is_chunk_local(&self) -> bool {
        matches!(
            self,
            ExtractError::Service(_)
                | ExtractError::Protocol(_)
                | ExtractError::MalformedResponse(_)
        )
    }
}
