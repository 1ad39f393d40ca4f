//! Entity module - extracted story elements and their board placement

use crate::section::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entity based on UUIDv7
///
/// Assigned once when the entity is created and never reused, even after
/// the entity is deleted from a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u128);

impl EntityId {
    /// Generate a new UUIDv7-based EntityId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an EntityId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an EntityId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid entity id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Kind of story entity
///
/// The declaration order is also the display priority used when sorting a
/// reconciled batch: scenes first, notes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A scene: a concrete dramatic unit within a section
    Scene,
    /// A character appearing in the manuscript
    Character,
    /// A physical or imagined place
    Location,
    /// A recurring theme or motif
    Theme,
    /// A free-form note
    Note,
}

impl EntityKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Scene => "scene",
            EntityKind::Character => "character",
            EntityKind::Location => "location",
            EntityKind::Theme => "theme",
            EntityKind::Note => "note",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "scene" => Some(EntityKind::Scene),
            "character" => Some(EntityKind::Character),
            "location" => Some(EntityKind::Location),
            "theme" => Some(EntityKind::Theme),
            "note" => Some(EntityKind::Note),
            _ => None,
        }
    }

    /// Sort priority within a reconciled batch (lower sorts first)
    pub fn priority(&self) -> u8 {
        match self {
            EntityKind::Scene => 0,
            EntityKind::Character => 1,
            EntityKind::Location => 2,
            EntityKind::Theme => 3,
            EntityKind::Note => 4,
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid entity kind: {}", s))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position on the story board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardPosition {
    /// Horizontal coordinate in board units
    pub x: f64,
    /// Vertical coordinate in board units
    pub y: f64,
}

impl BoardPosition {
    /// Create a position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for BoardPosition {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Mode-dependent section references for an entity
///
/// Exactly one representation exists per entity, decided by the book type of
/// the extraction run: a novel links entities to chapter ids, a story
/// collection links them to story titles. Modelling this as a tagged variant
/// keeps the two reference styles from coexisting on one record.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionLinks {
    /// Novel mode: references to chapter section ids
    Chapters(Vec<SectionId>),
    /// Collection mode: references to story titles
    Stories(Vec<String>),
}

impl SectionLinks {
    /// Whether the entity references no section at all
    pub fn is_empty(&self) -> bool {
        match self {
            SectionLinks::Chapters(ids) => ids.is_empty(),
            SectionLinks::Stories(titles) => titles.is_empty(),
        }
    }

    /// Number of referenced sections
    pub fn len(&self) -> usize {
        match self {
            SectionLinks::Chapters(ids) => ids.len(),
            SectionLinks::Stories(titles) => titles.len(),
        }
    }
}

/// A story entity on the board
///
/// Created by the reconciliation + layout pipeline (or manually by the user)
/// and thereafter owned by the project store.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,

    /// Kind of entity
    pub kind: EntityKind,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Mode-dependent section references
    pub links: SectionLinks,

    /// Position on the board
    pub position: BoardPosition,

    /// Whether the user has starred this entity
    pub starred: bool,

    /// Optional user-assigned folder label
    pub folder: Option<String>,
}
