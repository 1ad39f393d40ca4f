//! Project module - the persisted project schema
//!
//! This is the JSON document the UI and sync collaborators read and write.
//! Field names are camelCase on the wire; optional fields are omitted rather
//! than serialized as null.

use crate::entity::{BoardPosition, Entity, EntityId, EntityKind, SectionLinks};
use crate::section::{Manuscript, Section, SectionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or converting a persisted project
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The JSON document did not match the project schema
    #[error("Invalid project document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A record carried an id that is not a valid UUID
    #[error("Invalid id in project document: {0}")]
    InvalidId(String),
}

/// Manuscript mode: decides the reconciliation and reference policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    /// One continuous story; same-named entities merge across chapters
    Novel,
    /// Independent stories; same-named entities stay distinct per story
    Collection,
}

impl BookType {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Novel => "novel",
            BookType::Collection => "collection",
        }
    }

    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "novel" => Some(BookType::Novel),
            "collection" => Some(BookType::Collection),
            _ => None,
        }
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid book type: {}", s))
    }
}

/// A chapter (or story) record as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    /// Section id as a UUID string
    pub id: String,

    /// Chapter title
    pub title: String,

    /// Chapter body text
    pub content: String,

    /// Sequence index: 0 for front matter, 1-based otherwise
    pub order: usize,

    /// Present and true only for the synthetic front-matter chapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_front_matter: Option<bool>,
}

/// An entity record as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    /// Entity id as a UUID string
    pub id: String,

    /// Entity kind
    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Novel mode: referenced chapter ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_refs: Option<Vec<String>>,

    /// Collection mode: referenced story titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_refs: Option<Vec<String>>,

    /// Optional folder label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Board position
    pub position: BoardPosition,

    /// Starred flag, omitted when false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
}

/// The persisted project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project title
    pub title: String,

    /// Manuscript mode
    pub book_type: BookType,

    /// User-defined folder labels
    #[serde(default)]
    pub custom_folders: Vec<String>,

    /// Ordered chapters
    #[serde(default)]
    pub chapters: Vec<ChapterRecord>,

    /// Entities on the board
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

impl Project {
    /// Build a fresh project from a segmented manuscript
    ///
    /// The manuscript title is used when present, otherwise the fallback.
    pub fn from_manuscript(
        manuscript: &Manuscript,
        book_type: BookType,
        fallback_title: &str,
    ) -> Self {
        let title = manuscript
            .title
            .clone()
            .unwrap_or_else(|| fallback_title.to_string());

        let chapters = manuscript
            .sections
            .iter()
            .map(ChapterRecord::from_section)
            .collect();

        Self {
            title,
            book_type,
            custom_folders: Vec::new(),
            chapters,
            entities: Vec::new(),
        }
    }

    /// Rebuild domain sections from the persisted chapters
    pub fn sections(&self) -> Result<Vec<Section>, ProjectError> {
        self.chapters.iter().map(ChapterRecord::to_section).collect()
    }

    /// Append a batch of positioned entities produced by an extraction run
    ///
    /// Existing entities are left untouched; the batch is appended in order
    /// so user edits made before the run survive it.
    pub fn merge_extracted(&mut self, entities: &[Entity]) {
        self.entities
            .extend(entities.iter().map(EntityRecord::from_entity));
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ChapterRecord {
    /// Convert a domain section to its persisted form
    pub fn from_section(section: &Section) -> Self {
        Self {
            id: section.id.to_string(),
            title: section.title.clone(),
            content: section.body.clone(),
            order: section.index,
            is_front_matter: section.is_front_matter.then_some(true),
        }
    }

    /// Convert a persisted chapter back to a domain section
    pub fn to_section(&self) -> Result<Section, ProjectError> {
        let id = SectionId::from_string(&self.id).map_err(ProjectError::InvalidId)?;
        Ok(Section {
            id,
            title: self.title.clone(),
            body: self.content.clone(),
            index: self.order,
            is_front_matter: self.is_front_matter.unwrap_or(false),
        })
    }
}

impl EntityRecord {
    /// Convert a domain entity to its persisted form
    pub fn from_entity(entity: &Entity) -> Self {
        let (chapter_refs, story_refs) = match &entity.links {
            SectionLinks::Chapters(ids) => {
                (Some(ids.iter().map(|id| id.to_string()).collect()), None)
            }
            SectionLinks::Stories(titles) => (None, Some(titles.clone())),
        };

        Self {
            id: entity.id.to_string(),
            kind: entity.kind,
            name: entity.name.clone(),
            description: entity.description.clone(),
            chapter_refs,
            story_refs,
            folder: entity.folder.clone(),
            position: entity.position,
            starred: entity.starred.then_some(true),
        }
    }

    /// Convert a persisted record back to a domain entity
    ///
    /// A record carrying neither reference style becomes an entity with an
    /// empty chapter list; one carrying both is resolved in favor of the
    /// chapter refs (novel mode wins, matching the importer's precedence).
    pub fn to_entity(&self) -> Result<Entity, ProjectError> {
        let links = if let Some(refs) = &self.chapter_refs {
            let ids = refs
                .iter()
                .map(|s| SectionId::from_string(s).map_err(ProjectError::InvalidId))
                .collect::<Result<Vec<_>, _>>()?;
            SectionLinks::Chapters(ids)
        } else if let Some(titles) = &self.story_refs {
            SectionLinks::Stories(titles.clone())
        } else {
            SectionLinks::Chapters(Vec::new())
        };

        let id = EntityId::from_string(&self.id).map_err(ProjectError::InvalidId)?;
        Ok(Entity {
            id,
            kind: self.kind,
            name: self.name.clone(),
            description: self.description.clone(),
            links,
            position: self.position,
            starred: self.starred.unwrap_or(false),
            folder: self.folder.clone(),
        })
    }
}
