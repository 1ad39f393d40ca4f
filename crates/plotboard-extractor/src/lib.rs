//! Plotboard Extractor
//!
//! Turns a flat manuscript into structured, positioned story entities.
//!
//! # Overview
//!
//! This crate is the manuscript segmentation and AI-assisted entity
//! extraction pipeline. Raw text is segmented into ordered sections, split
//! into bounded chunks for a size-limited text-generation service, and the
//! per-chunk results are sanitized, reconciled across chunks, and laid out
//! on the board without overlaps.
//!
//! # Architecture
//!
//! ```text
//! Text → Segmenter → ChunkPlanner → ExtractionClient (per chunk, sequential)
//!      → ResponseSanitizer → EntityReconciler → LayoutEngine → Entities
//! ```
//!
//! # Key Features
//!
//! - **Markdown segmentation**: H1 title, H2 chapter boundaries, front
//!   matter capture, H1 fallback for header-light manuscripts
//! - **Chunked extraction**: positional section groups sized for the
//!   service's limits, processed strictly in order
//! - **Truncation tolerance**: salvage of responses cut off mid-record,
//!   plus a one-shot fallback from the single-request path to chunking
//! - **Mode-aware reconciliation**: novels merge same-named entities,
//!   story collections keep them distinct
//! - **Deterministic layout**: row-major grid placement for batches
//!
//! # Example Usage
//!
//! ```no_run
//! use plotboard_domain::BookType;
//! use plotboard_extractor::{segment, Extractor, ExtractorConfig, ExtractionRequest};
//! use plotboard_llm::MockGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manuscript = segment("# Book\n\n## Chapter One\nText.");
//!
//! let generator = MockGenerator::new(r#"[{"type":"scene","name":"Opening","description":"...","sections":[1]}]"#);
//! let extractor = Extractor::new(generator, ExtractorConfig::default());
//!
//! let request = ExtractionRequest {
//!     sections: manuscript.sections,
//!     book_type: BookType::Novel,
//! };
//! let report = extractor.run(request).await?;
//!
//! println!("Extracted {} entities", report.entities.len());
//! println!("{}", report.log.render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod client;
mod config;
mod error;
mod extractor;
mod layout;
mod parser;
mod prompt;
mod reconciler;
mod runlog;
mod segmenter;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{plan, serialize_section};
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use extractor::Extractor;
pub use layout::{next_free_position, place_batch, CELL_HEIGHT, CELL_WIDTH, GRID_COLUMNS, GRID_ORIGIN_X, GRID_ORIGIN_Y};
pub use parser::sanitize;
pub use reconciler::reconcile;
pub use runlog::{LogLevel, RunLog, RunLogEntry};
pub use segmenter::segment;
pub use types::{ChunkGroup, EntityDraft, ExtractionOutcome, ExtractionRequest, ExtractionRunReport};
