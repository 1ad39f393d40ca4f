//! Run orchestration - the full extraction pipeline
//!
//! Chunks are processed strictly in order, one request in flight at a time,
//! so progress stays linear and the service's rate limits are respected.
//! A failed chunk is logged and skipped; the run as a whole fails only when
//! nothing at all was produced. The project's entity collection is never
//! touched here - positioned entities are handed back to the caller once
//! the whole reconcile + layout pass has finished.

use crate::chunking;
use crate::client::ExtractionClient;
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::layout;
use crate::reconciler::reconcile;
use crate::runlog::RunLog;
use crate::types::{ChunkGroup, EntityDraft, ExtractionRequest, ExtractionRunReport};
use plotboard_domain::{BookType, Section, TextGenerator};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The extraction pipeline: segmented manuscript in, positioned entities out
pub struct Extractor<G> {
    client: ExtractionClient<G>,
    config: ExtractorConfig,
    cancel: CancellationToken,
}

impl<G> Extractor<G>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: std::fmt::Display,
{
    /// Create an extractor over a generation service
    pub fn new(generator: G, config: ExtractorConfig) -> Self {
        let budget = config.generation_budget_tokens;
        Self {
            client: ExtractionClient::new(generator, budget),
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token; a cancelled token stops the run between
    /// chunk calls
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the full pipeline for a segmented manuscript
    ///
    /// Preconditions (a valid configuration, at least one extractable
    /// section) are checked before any request is made and fail with
    /// `Configuration`. Afterwards, only total failure surfaces:
    /// `EmptyResult` when every chunk was attempted and no entity came back,
    /// or `Cancelled` when the token fired between chunks.
    pub async fn run(&self, request: ExtractionRequest) -> Result<ExtractionRunReport, ExtractError> {
        let mut log = RunLog::new();

        self.config.validate().map_err(ExtractError::Configuration)?;

        let extractable: Vec<Section> = request
            .sections
            .iter()
            .filter(|s| s.is_extractable())
            .cloned()
            .collect();
        if extractable.is_empty() {
            return Err(ExtractError::Configuration(
                "Manuscript has no extractable sections".to_string(),
            ));
        }

        let groups = chunking::plan(
            &request.sections,
            self.config.size_threshold_chars,
            self.config.chunk_group_size,
        );
        log.info(format!(
            "Planned {} request(s) for {} section(s)",
            groups.len(),
            extractable.len()
        ));

        let mut fell_back_to_chunks = false;
        let (drafts_by_chunk, chunks_attempted, chunks_failed) = if groups.len() == 1 {
            match self.run_single(&groups[0], request.book_type, &mut log).await? {
                SinglePath::Complete(drafts) => (vec![drafts], 1, 0),
                SinglePath::Failed => (Vec::new(), 1, 1),
                SinglePath::Truncated => {
                    // The partial result is discarded; the same section set
                    // is re-sent as chunked requests, once.
                    fell_back_to_chunks = true;
                    log.warn(
                        "Single request was cut short by the generation budget; \
                         falling back to chunked requests",
                    );
                    let fallback = chunking::partition(&extractable, self.config.chunk_group_size);
                    log.info(format!("Fallback planned {} chunked request(s)", fallback.len()));
                    let (drafts, attempted, failed) =
                        self.run_chunks(&fallback, request.book_type, &mut log).await?;
                    (drafts, attempted + 1, failed)
                }
            }
        } else {
            self.run_chunks(&groups, request.book_type, &mut log).await?
        };

        let total_drafts: usize = drafts_by_chunk.iter().map(Vec::len).sum();
        if total_drafts == 0 {
            return Err(ExtractError::EmptyResult);
        }

        let entities = reconcile(drafts_by_chunk, request.book_type, &request.sections);
        let entities = layout::place_batch(entities);

        log.info(format!(
            "Run complete: {} entities from {} draft(s), {}/{} chunk(s) failed",
            entities.len(),
            total_drafts,
            chunks_failed,
            chunks_attempted
        ));
        info!("Extraction run produced {} entities", entities.len());

        Ok(ExtractionRunReport {
            entities,
            chunks_attempted,
            chunks_failed,
            fell_back_to_chunks,
            log,
        })
    }

    /// Attempt the single-request path
    async fn run_single(
        &self,
        group: &ChunkGroup,
        book_type: BookType,
        log: &mut RunLog,
    ) -> Result<SinglePath, ExtractError> {
        if self.cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        log.info(format!("Requesting extraction for {}", group.range_label()));

        match self.client.extract(group, book_type).await {
            Ok(outcome) if outcome.was_truncated => Ok(SinglePath::Truncated),
            Ok(outcome) => {
                log.info(format!("Received {} draft(s)", outcome.drafts.len()));
                Ok(SinglePath::Complete(outcome.drafts))
            }
            Err(e) if e.is_chunk_local() => {
                log.warn(format!(
                    "Request for {} ({} chars) failed: {}",
                    group.range_label(),
                    chunking::serialized_len(&group.sections),
                    e
                ));
                Ok(SinglePath::Failed)
            }
            Err(e) => Err(e),
        }
    }

    /// Process chunk groups sequentially, skipping failed chunks
    async fn run_chunks(
        &self,
        groups: &[ChunkGroup],
        book_type: BookType,
        log: &mut RunLog,
    ) -> Result<(Vec<Vec<EntityDraft>>, usize, usize), ExtractError> {
        let mut drafts_by_chunk = Vec::new();
        let mut failed = 0;

        for (idx, group) in groups.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(ExtractError::Cancelled);
            }

            log.info(format!(
                "Requesting extraction for chunk {}/{} ({})",
                idx + 1,
                groups.len(),
                group.range_label()
            ));

            match self.client.extract(group, book_type).await {
                Ok(outcome) => {
                    if outcome.was_truncated {
                        log.warn(format!(
                            "Chunk {}/{} output was cut short; kept {} salvaged draft(s)",
                            idx + 1,
                            groups.len(),
                            outcome.drafts.len()
                        ));
                    } else {
                        log.info(format!(
                            "Chunk {}/{} produced {} draft(s)",
                            idx + 1,
                            groups.len(),
                            outcome.drafts.len()
                        ));
                    }
                    drafts_by_chunk.push(outcome.drafts);
                }
                Err(e) if e.is_chunk_local() => {
                    failed += 1;
                    log.warn(format!(
                        "Chunk {}/{} ({}, {} chars) failed and was skipped: {}",
                        idx + 1,
                        groups.len(),
                        group.range_label(),
                        chunking::serialized_len(&group.sections),
                        e
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        Ok((drafts_by_chunk, groups.len(), failed))
    }
}

/// Outcome of the single-request path
enum SinglePath {
    /// Complete response; the run can finish without chunking
    Complete(Vec<EntityDraft>),
    /// The request failed and was logged; nothing to fall back to
    Failed,
    /// The service cut the output short; escalate to the chunked path
    Truncated,
}
