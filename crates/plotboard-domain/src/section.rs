//! Section module - titled units of manuscript content

use std::fmt;

/// Unique identifier for a section based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, so import order is recoverable from ids
/// - 128-bit uniqueness with no coordination required
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(u128);

impl SectionId {
    /// Generate a new UUIDv7-based SectionId
    ///
    /// # Examples
    ///
    /// ```
    /// use plotboard_domain::SectionId;
    ///
    /// let id = SectionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SectionId from a raw u128 value
    ///
    /// This is primarily for deserialization of persisted projects.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SectionId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid section id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A titled unit of manuscript content (a chapter or story)
///
/// Sections are created once per import and keep their identity until the
/// manuscript is re-imported. Index 0 is reserved for front matter; real
/// sections are numbered densely from 1 in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Unique identifier, assigned at import
    pub id: SectionId,

    /// Section title (header text without the marker)
    pub title: String,

    /// Body text, trimmed of leading/trailing blank lines
    pub body: String,

    /// Sequence index: 0 for front matter, 1-based for real sections
    pub index: usize,

    /// Whether this section is synthetic front matter
    pub is_front_matter: bool,
}

impl Section {
    /// Create a real (non-front-matter) section
    ///
    /// The index is provisional; the segmenter renumbers sections densely
    /// once the whole manuscript has been scanned.
    pub fn new(title: impl Into<String>, body: impl Into<String>, index: usize) -> Self {
        Self {
            id: SectionId::new(),
            title: title.into(),
            body: body.into(),
            index,
            is_front_matter: false,
        }
    }

    /// Create a synthetic front-matter section at index 0
    pub fn front_matter(body: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            title: "Front Matter".to_string(),
            body: body.into(),
            index: 0,
            is_front_matter: true,
        }
    }

    /// Whether this section participates in entity extraction
    pub fn is_extractable(&self) -> bool {
        !self.is_front_matter
    }
}

/// Result of segmenting a raw manuscript
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manuscript {
    /// Book title, taken from the first first-level header when present
    pub title: Option<String>,

    /// Ordered sections; front matter, if any, is at index 0
    pub sections: Vec<Section>,
}

impl Manuscript {
    /// Sections that participate in extraction (everything but front matter)
    pub fn extractable_sections(&self) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.is_extractable()).collect()
    }

    /// Whether the manuscript has any extractable content
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| !s.is_extractable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_uniqueness() {
        let a = SectionId::new();
        let b = SectionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_section_id_string_round_trip() {
        let id = SectionId::new();
        let parsed = SectionId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_section_id_invalid_string() {
        assert!(SectionId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_front_matter_is_not_extractable() {
        let fm = Section::front_matter("A note to the reader.");
        assert_eq!(fm.index, 0);
        assert!(fm.is_front_matter);
        assert!(!fm.is_extractable());
    }

    #[test]
    fn test_manuscript_extractable_sections_skip_front_matter() {
        let manuscript = Manuscript {
            title: Some("Book".to_string()),
            sections: vec![
                Section::front_matter("dedication"),
                Section::new("Chapter One", "text", 1),
                Section::new("Chapter Two", "text", 2),
            ],
        };
        assert_eq!(manuscript.extractable_sections().len(), 2);
        assert!(!manuscript.is_empty());
    }

    #[test]
    fn test_manuscript_with_only_front_matter_is_empty() {
        let manuscript = Manuscript {
            title: None,
            sections: vec![Section::front_matter("just a note")],
        };
        assert!(manuscript.is_empty());
    }
}
