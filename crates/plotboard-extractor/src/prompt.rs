//! Prompt engineering for entity extraction

use crate::chunking::serialize_section;
use crate::types::ChunkGroup;
use plotboard_domain::BookType;

/// Builds the extraction prompt for one chunk
pub struct PromptBuilder<'a> {
    chunk: &'a ChunkGroup,
    book_type: BookType,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a chunk
    pub fn new(chunk: &'a ChunkGroup, book_type: BookType) -> Self {
        Self { chunk, book_type }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and format specification
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push('\n');

        // 2. Absolute numbering constraint for this chunk
        prompt.push_str(&format!(
            "The sections below are numbered {} through {}. Use those exact numbers in the \"sections\" field; never renumber from 1.\n\n",
            self.chunk.start_index, self.chunk.end_index
        ));

        // 3. Mode-specific policy
        if self.book_type == BookType::Collection {
            prompt.push_str(COLLECTION_MODE_NOTE);
            prompt.push_str("\n\n");
        }

        // 4. The manuscript sections
        prompt.push_str("Manuscript sections:\n---\n");
        for section in &self.chunk.sections {
            prompt.push_str(&serialize_section(section));
        }
        prompt.push_str("---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are analyzing a manuscript. Extract the story entities from the sections below.

Extract, in this priority order:
1. scenes - concrete dramatic units; every section must yield at least one scene
2. characters - named or clearly identified people
3. locations - physical or imagined places
4. themes - recurring ideas or motifs

Each entity is a JSON object:

{
  "type": "scene" | "character" | "location" | "theme",
  "name": "short display name",
  "description": "one or two sentences",
  "sections": [section numbers where it appears]
}

Rules:
- "type" must be exactly one of: scene, character, location, theme
- Keep names short; put detail in the description
- List every section number where the entity appears"#;

const COLLECTION_MODE_NOTE: &str = r#"This book is a collection of independent stories. Characters with the same name in different sections are DIFFERENT individuals; never merge them, and keep each one's "sections" list limited to its own story."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "type": "scene",
    "name": "name",
    "description": "description",
    "sections": [1]
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
