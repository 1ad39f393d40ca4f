//! Manuscript segmentation
//!
//! Converts raw markdown-style text into an ordered section list plus an
//! optional book title. The first first-level header is the title; each
//! second-level header starts a section; non-blank content between the title
//! and the first section becomes synthetic front matter at index 0. When a
//! manuscript has no second-level headers at all, the scan is repeated with
//! first-level headers as the section boundaries and no title is reported.

use plotboard_domain::{Manuscript, Section};
use tracing::debug;

/// Header boundary level for one scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryLevel {
    /// Normal mode: `##` starts a section, the first `#` is the title
    Second,
    /// Fallback mode: `#` starts a section, no title is captured
    First,
}

/// A section under construction during a scan
struct OpenSection {
    title: String,
    lines: Vec<String>,
}

/// Segment raw manuscript text into a title and ordered sections
///
/// Empty input yields an empty manuscript. A document with headers but no
/// section content still yields sections; a document with no usable
/// boundaries yields zero sections, which is a valid (empty) result rather
/// than an error.
pub fn segment(text: &str) -> Manuscript {
    let manuscript = scan(text, BoundaryLevel::Second);
    if !manuscript.sections.iter().any(|s| s.is_extractable()) {
        let fallback = scan(text, BoundaryLevel::First);
        if fallback.sections.iter().any(|s| s.is_extractable()) {
            debug!(
                "No second-level headers found; fell back to first-level boundaries ({} sections)",
                fallback.sections.len()
            );
            return fallback;
        }
    }
    manuscript
}

fn scan(text: &str, boundary: BoundaryLevel) -> Manuscript {
    let mut title: Option<String> = None;
    let mut front_lines: Vec<String> = Vec::new();
    let mut finished: Vec<OpenSection> = Vec::new();
    let mut open: Option<OpenSection> = None;
    let mut seen_section = false;

    for line in text.lines() {
        match header_level(line) {
            Some((level, heading)) if is_boundary(level, boundary) => {
                if let Some(section) = open.take() {
                    finished.push(section);
                }
                open = Some(OpenSection {
                    title: heading.to_string(),
                    lines: Vec::new(),
                });
                seen_section = true;
            }
            Some((1, heading)) => {
                // Only reachable in Second mode. The first pre-section H1 is
                // the title; any other H1 just terminates body accumulation.
                if let Some(section) = open.take() {
                    finished.push(section);
                }
                if title.is_none() && !seen_section {
                    title = Some(heading.to_string());
                }
            }
            _ => {
                if let Some(section) = open.as_mut() {
                    section.lines.push(line.to_string());
                } else if !seen_section
                    && (title.is_some() || boundary == BoundaryLevel::First)
                {
                    // Front matter is the content between the title and the
                    // first section. Untitled leading prose belongs nowhere;
                    // fallback mode has no title, so there the pre-boundary
                    // prose is the front matter.
                    front_lines.push(line.to_string());
                }
                // Content stranded between a terminating header and the next
                // section boundary belongs to no section and is dropped.
            }
        }
    }
    if let Some(section) = open.take() {
        finished.push(section);
    }

    build(title, front_lines, finished, boundary)
}

fn is_boundary(level: usize, boundary: BoundaryLevel) -> bool {
    match boundary {
        BoundaryLevel::Second => level == 2,
        BoundaryLevel::First => level == 1,
    }
}

/// Assemble the manuscript, trimming bodies and renumbering densely so
/// insertion order determines the final order.
fn build(
    title: Option<String>,
    front_lines: Vec<String>,
    finished: Vec<OpenSection>,
    boundary: BoundaryLevel,
) -> Manuscript {
    let mut sections = Vec::new();

    let front_body = front_lines.join("\n").trim().to_string();
    if !front_body.is_empty() && !finished.is_empty() {
        sections.push(Section::front_matter(front_body));
    }

    for raw in finished {
        let body = raw.lines.join("\n").trim().to_string();
        // In fallback mode a lone header with no body is a title-like
        // artifact, not a section.
        if boundary == BoundaryLevel::First && body.is_empty() {
            continue;
        }
        sections.push(Section::new(raw.title, body, 0));
    }

    let mut next_index = 1;
    for section in sections.iter_mut() {
        if !section.is_front_matter {
            section.index = next_index;
            next_index += 1;
        }
    }

    Manuscript {
        title: match boundary {
            BoundaryLevel::Second => title,
            BoundaryLevel::First => None,
        },
        sections,
    }
}

/// Parse a markdown header line into (level, heading text)
///
/// Only `#` and `##` markers matter to segmentation; deeper headers are
/// ordinary content.
fn header_level(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 2 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.starts_with(' ') && !rest.is_empty() {
        return None;
    }
    Some((hashes, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let manuscript = segment("");
        assert!(manuscript.title.is_none());
        assert!(manuscript.sections.is_empty());
    }

    #[test]
    fn test_basic_title_and_sections() {
        let manuscript = segment("# My Book\n\n## One\nFirst chapter.\n\n## Two\nSecond chapter.");
        assert_eq!(manuscript.title.as_deref(), Some("My Book"));
        assert_eq!(manuscript.sections.len(), 2);
        assert_eq!(manuscript.sections[0].title, "One");
        assert_eq!(manuscript.sections[0].body, "First chapter.");
        assert_eq!(manuscript.sections[0].index, 1);
        assert_eq!(manuscript.sections[1].index, 2);
    }

    #[test]
    fn test_sections_without_title() {
        let manuscript = segment("## A\ntext a\n## B\ntext b\n## C\ntext c");
        assert!(manuscript.title.is_none());
        assert_eq!(manuscript.sections.len(), 3);
        assert!(manuscript.sections.iter().all(|s| !s.is_front_matter));
        let indices: Vec<usize> = manuscript.sections.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_front_matter_captured_at_index_zero() {
        let manuscript = segment("# Book\n\nA dedication line.\n\n## One\nChapter text.");
        assert_eq!(manuscript.sections.len(), 2);
        let front = &manuscript.sections[0];
        assert!(front.is_front_matter);
        assert_eq!(front.index, 0);
        assert_eq!(front.body, "A dedication line.");
        assert_eq!(manuscript.sections[1].index, 1);
    }

    #[test]
    fn test_leading_prose_without_title_is_dropped() {
        let manuscript = segment("intro prose\n\n## One\ntext");
        assert!(manuscript.title.is_none());
        assert_eq!(manuscript.sections.len(), 1);
        assert!(!manuscript.sections[0].is_front_matter);
        assert_eq!(manuscript.sections[0].index, 1);
    }

    #[test]
    fn test_blank_only_front_matter_is_dropped() {
        let manuscript = segment("# Book\n\n\n\n## One\nText.");
        assert_eq!(manuscript.sections.len(), 1);
        assert!(!manuscript.sections[0].is_front_matter);
    }

    #[test]
    fn test_only_first_h1_is_title() {
        let manuscript = segment("# Real Title\n\n# Another H1\n\n## One\nText.");
        assert_eq!(manuscript.title.as_deref(), Some("Real Title"));
        assert_eq!(manuscript.sections.len(), 1);
    }

    #[test]
    fn test_interior_h1_terminates_body() {
        let manuscript = segment("# T\n\n## One\nkept\n# Part Two\ndropped\n## Two\nalso kept");
        assert_eq!(manuscript.sections.len(), 2);
        assert_eq!(manuscript.sections[0].body, "kept");
        assert_eq!(manuscript.sections[1].body, "also kept");
    }

    #[test]
    fn test_body_trimmed_of_blank_edges() {
        let manuscript = segment("## One\n\n\ntext here\n\n\n## Two\nmore");
        assert_eq!(manuscript.sections[0].body, "text here");
    }

    #[test]
    fn test_fallback_to_first_level_headers() {
        let manuscript = segment("# Story A\ntext a\n# Story B\ntext b");
        assert!(manuscript.title.is_none());
        assert_eq!(manuscript.sections.len(), 2);
        assert_eq!(manuscript.sections[0].title, "Story A");
        assert_eq!(manuscript.sections[0].index, 1);
        assert_eq!(manuscript.sections[1].title, "Story B");
    }

    #[test]
    fn test_title_only_document_yields_no_sections() {
        let manuscript = segment("# Just a Title\n");
        assert!(manuscript.sections.is_empty());
    }

    #[test]
    fn test_plain_text_yields_no_sections() {
        let manuscript = segment("no headers here\njust prose\n");
        assert!(manuscript.title.is_none());
        assert!(manuscript.sections.is_empty());
    }

    #[test]
    fn test_deeper_headers_are_content() {
        let manuscript = segment("## One\n### subsection\nmore text");
        assert_eq!(manuscript.sections.len(), 1);
        assert!(manuscript.sections[0].body.contains("### subsection"));
    }

    #[test]
    fn test_hashes_without_space_are_content() {
        let manuscript = segment("## One\n#hashtag not a header\n");
        assert_eq!(manuscript.sections.len(), 1);
        assert!(manuscript.sections[0].body.contains("#hashtag"));
    }

    #[test]
    fn test_front_matter_in_fallback_mode() {
        let manuscript = segment("intro note\n\n# Story A\ntext a\n# Story B\ntext b");
        assert!(manuscript.sections[0].is_front_matter);
        assert_eq!(manuscript.sections[0].body, "intro note");
        assert_eq!(manuscript.sections.len(), 3);
    }

    #[test]
    fn test_section_ids_are_unique() {
        let manuscript = segment("## A\nx\n## B\ny");
        assert_ne!(manuscript.sections[0].id, manuscript.sections[1].id);
    }
}
