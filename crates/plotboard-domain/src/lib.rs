//! Plotboard Domain Layer
//!
//! Core types shared by every other Plotboard crate: manuscripts and their
//! sections, extracted story entities, the persisted project schema, and the
//! trait seam to the text-generation service.
//!
//! ## Key Concepts
//!
//! - **Section**: a titled unit of manuscript content (a chapter or story);
//!   index 0 is reserved for front matter when present
//! - **Entity**: an extracted or manually-created story element (scene,
//!   character, location, theme, note) with a board position
//! - **BookType**: reconciliation policy flag — a novel merges same-named
//!   entities across sections, a collection keeps them distinct
//! - **TextGenerator**: the black-box extraction service boundary
//!
//! Infrastructure implementations (HTTP generators, the extraction pipeline,
//! the CLI) live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod project;
pub mod section;
pub mod traits;

// Re-exports for convenience
pub use entity::{BoardPosition, Entity, EntityId, EntityKind, SectionLinks};
pub use project::{BookType, Project};
pub use section::{Manuscript, Section, SectionId};
pub use traits::{Generation, TextGenerator};
