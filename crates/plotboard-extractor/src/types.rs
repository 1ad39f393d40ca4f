//! Request, chunk, and result types for the extraction pipeline

use crate::runlog::RunLog;
use plotboard_domain::{BookType, Entity, EntityKind, Section};
use serde::{Deserialize, Serialize};

/// Request to extract entities from a segmented manuscript
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// All sections of the manuscript, front matter included; only
    /// extractable sections are sent to the service
    pub sections: Vec<Section>,

    /// Manuscript mode, decides the reconciliation policy
    pub book_type: BookType,
}

/// A bounded group of consecutive sections sent to the service in one request
///
/// Groups partition the extractable section list exactly once, in order,
/// with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkGroup {
    /// The sections in this chunk, in manuscript order
    pub sections: Vec<Section>,

    /// Absolute index of the first section in the chunk
    pub start_index: usize,

    /// Absolute index of the last section in the chunk
    pub end_index: usize,
}

impl ChunkGroup {
    /// Human-readable section range, for diagnostics
    pub fn range_label(&self) -> String {
        if self.start_index == self.end_index {
            format!("section {}", self.start_index)
        } else {
            format!("sections {}-{}", self.start_index, self.end_index)
        }
    }
}

/// A transient entity record produced by the service, before reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDraft {
    /// Kind of entity
    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Entity name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// 1-based absolute section numbers this entity appears in
    #[serde(default)]
    pub sections: Vec<usize>,
}

impl EntityDraft {
    /// Validate that the draft is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        Ok(())
    }
}

/// Result of one extraction request against the service
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    /// Entity drafts parsed from the response
    pub drafts: Vec<EntityDraft>,

    /// Whether the service reported its output was cut short by the
    /// generation budget (independent of the sanitizer's salvage)
    pub was_truncated: bool,
}

/// Result of a whole extraction run
#[derive(Debug)]
pub struct ExtractionRunReport {
    /// Reconciled, positioned entities
    pub entities: Vec<Entity>,

    /// Number of chunk requests attempted
    pub chunks_attempted: usize,

    /// Number of chunk requests that failed and were skipped
    pub chunks_failed: usize,

    /// Whether the single-request path was abandoned for the chunked path
    pub fell_back_to_chunks: bool,

    /// Human-readable run diagnostics, advisory only
    pub log: RunLog,
}
