//! Trait definitions for external collaborators
//!
//! These traits define the boundary between the extraction pipeline and
//! infrastructure. Implementations live in other crates (plotboard-llm).

/// One completed generation from the text service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// The generated text
    pub text: String,

    /// Whether generation stopped because the budget ran out, rather than
    /// because the model finished
    pub truncated: bool,
}

/// Trait for the external text-generation service
///
/// Any service that accepts a prompt plus a generation budget and reports
/// whether its output was cut short satisfies this contract; the pipeline
/// treats it as a black box.
pub trait TextGenerator {
    /// Error type for generation failures (transport, auth, protocol)
    type Error;

    /// Generate text for a prompt, bounded by `max_tokens`
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Generation, Self::Error>;
}
