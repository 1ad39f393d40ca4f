//! Extraction client - one request to the service per chunk

use crate::error::ExtractError;
use crate::parser::sanitize;
use crate::prompt::PromptBuilder;
use crate::types::{ChunkGroup, ExtractionOutcome};
use plotboard_domain::{BookType, Generation, TextGenerator};
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues extraction requests against the text-generation service
pub(crate) struct ExtractionClient<G> {
    generator: Arc<G>,
    budget_tokens: u32,
}

impl<G> ExtractionClient<G>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: std::fmt::Display,
{
    /// Create a client with a generation budget per request
    pub fn new(generator: G, budget_tokens: u32) -> Self {
        Self {
            generator: Arc::new(generator),
            budget_tokens,
        }
    }

    /// Extract entity drafts for one chunk
    ///
    /// Fails with `Service` on transport/auth failure, `Protocol` when the
    /// response carries no usable text at all, and `MalformedResponse` when
    /// the text cannot be parsed even after salvage. The returned
    /// `was_truncated` flag is the service's own cut-short signal, separate
    /// from whatever the sanitizer salvaged; a cut-short response with
    /// nothing salvageable yields an empty outcome carrying the flag, so the
    /// orchestrator can still switch strategies.
    pub async fn extract(
        &self,
        chunk: &ChunkGroup,
        book_type: BookType,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let prompt = PromptBuilder::new(chunk, book_type).build();
        debug!("Prompt length: {} chars for {}", prompt.len(), chunk.range_label());

        let generation = self.call_service(prompt).await?;
        debug!("Response length: {} chars", generation.text.len());

        if generation.text.trim().is_empty() {
            return Err(ExtractError::Protocol(
                "Response contained no usable text".to_string(),
            ));
        }

        let drafts = match sanitize(&generation.text) {
            Ok(drafts) => drafts,
            Err(e) if generation.truncated => {
                warn!("Nothing salvageable in cut-short response: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(ExtractionOutcome {
            drafts,
            was_truncated: generation.truncated,
        })
    }

    /// Call the generation service
    async fn call_service(&self, prompt: String) -> Result<Generation, ExtractError> {
        let generator = Arc::clone(&self.generator);
        let budget = self.budget_tokens;

        // The TextGenerator trait is blocking; bridge it off the async loop
        tokio::task::spawn_blocking(move || {
            generator
                .generate(&prompt, budget)
                .map_err(|e| ExtractError::Service(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Service(format!("Task join error: {}", e)))?
    }
}
