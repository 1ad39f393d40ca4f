//! Chunk planning for size-limited extraction requests
//!
//! Decides whether a manuscript fits in one request and, when it does not,
//! partitions the extractable sections into consecutive fixed-size groups.
//! Group boundaries are purely positional, never content-based.

use crate::types::ChunkGroup;
use plotboard_domain::Section;
use tracing::debug;

/// Serialize one section the way the extraction prompt will render it
///
/// The chunk planner measures total length with this exact formatting so
/// the threshold decision matches what is actually sent to the service.
pub fn serialize_section(section: &Section) -> String {
    format!("Section {}: {}\n{}\n\n", section.index, section.title, section.body)
}

/// Total serialized length of the extractable sections, in characters
pub(crate) fn serialized_len(sections: &[Section]) -> usize {
    sections
        .iter()
        .filter(|s| s.is_extractable())
        .map(|s| serialize_section(s).chars().count())
        .sum()
}

/// Plan the chunk groups for an extraction run
///
/// Front matter is excluded. If the serialized manuscript fits under the
/// threshold a single group holds every extractable section; otherwise the
/// sections are partitioned into consecutive groups of `group_size` (the
/// last group may be smaller). The union of all groups, in order, is exactly
/// the extractable section list.
pub fn plan(sections: &[Section], size_threshold_chars: usize, group_size: usize) -> Vec<ChunkGroup> {
    let extractable: Vec<Section> = sections
        .iter()
        .filter(|s| s.is_extractable())
        .cloned()
        .collect();

    if extractable.is_empty() {
        return Vec::new();
    }

    let total = serialized_len(&extractable);
    if total <= size_threshold_chars {
        debug!("Manuscript fits in one request ({} chars)", total);
        return vec![group_of(extractable)];
    }

    debug!(
        "Manuscript exceeds threshold ({} > {} chars), splitting into groups of {}",
        total, size_threshold_chars, group_size
    );
    partition(&extractable, group_size)
}

/// Partition sections into consecutive groups of `group_size`, regardless of
/// total size
///
/// Used directly when the single-request path truncates and the run falls
/// back to chunking the same section set.
pub(crate) fn partition(sections: &[Section], group_size: usize) -> Vec<ChunkGroup> {
    sections
        .chunks(group_size.max(1))
        .map(|window| group_of(window.to_vec()))
        .collect()
}

fn group_of(sections: Vec<Section>) -> ChunkGroup {
    let start_index = sections.first().map(|s| s.index).unwrap_or(0);
    let end_index = sections.last().map(|s| s.index).unwrap_or(0);
    ChunkGroup {
        sections,
        start_index,
        end_index,
    }
}
