//! Entity reconciliation - merge per-chunk drafts into one coherent set
//!
//! Drafts arrive in chunk order, draft order within a chunk. Novel mode
//! folds them into a mapping keyed by (kind, normalized name), merging
//! section numbers and keeping first-seen order; collection mode keeps every
//! draft distinct. Section numbers are then resolved to chapter ids (novel)
//! or story titles (collection), and the result is ordered by kind priority
//! then earliest section.

use crate::types::EntityDraft;
use plotboard_domain::{
    BookType, Entity, EntityId, EntityKind, BoardPosition, Section, SectionLinks,
};
use std::collections::HashMap;

/// A draft after cross-chunk merging, before reference resolution
struct MergedDraft {
    kind: EntityKind,
    name: String,
    description: String,
    sections: Vec<usize>,
}

/// Reconcile per-chunk drafts into entities (positions not yet assigned)
///
/// `sections` is the full section list of the manuscript; references to
/// section numbers with no matching section are dropped.
pub fn reconcile(
    drafts_by_chunk: Vec<Vec<EntityDraft>>,
    book_type: BookType,
    sections: &[Section],
) -> Vec<Entity> {
    let flattened: Vec<EntityDraft> = drafts_by_chunk.into_iter().flatten().collect();

    let merged = match book_type {
        BookType::Novel => merge_novel(flattened),
        BookType::Collection => flattened
            .into_iter()
            .map(|d| MergedDraft {
                kind: d.kind,
                name: d.name,
                description: d.description,
                sections: d.sections,
            })
            .collect(),
    };

    let by_number: HashMap<usize, &Section> = sections
        .iter()
        .filter(|s| s.is_extractable())
        .map(|s| (s.index, s))
        .collect();

    let mut entities: Vec<(Option<usize>, Entity)> = merged
        .into_iter()
        .map(|draft| resolve(draft, book_type, &by_number))
        .collect();

    // Kind priority first, earliest resolved section second; entities with
    // no resolvable section sort last within their kind. The sort is stable,
    // so first-seen order breaks ties.
    entities.sort_by_key(|(first_section, entity)| {
        (entity.kind.priority(), first_section.unwrap_or(usize::MAX))
    });

    entities.into_iter().map(|(_, entity)| entity).collect()
}

/// Fold same-kind, same-name drafts together, preserving first-seen order
///
/// The first occurrence keeps its name and description; later occurrences
/// only contribute their section numbers.
fn merge_novel(drafts: Vec<EntityDraft>) -> Vec<MergedDraft> {
    let mut order: Vec<MergedDraft> = Vec::new();
    let mut index: HashMap<(EntityKind, String), usize> = HashMap::new();

    for draft in drafts {
        let key = (draft.kind, draft.name.trim().to_lowercase());
        match index.get(&key) {
            Some(&at) => {
                order[at].sections.extend(draft.sections);
            }
            None => {
                index.insert(key, order.len());
                order.push(MergedDraft {
                    kind: draft.kind,
                    name: draft.name,
                    description: draft.description,
                    sections: draft.sections,
                });
            }
        }
    }

    for merged in order.iter_mut() {
        merged.sections.sort_unstable();
        merged.sections.dedup();
    }

    order
}

/// Resolve a merged draft's section numbers into mode-appropriate links
fn resolve(
    draft: MergedDraft,
    book_type: BookType,
    by_number: &HashMap<usize, &Section>,
) -> (Option<usize>, Entity) {
    let mut numbers: Vec<usize> = draft
        .sections
        .iter()
        .copied()
        .filter(|n| by_number.contains_key(n))
        .collect();
    numbers.sort_unstable();
    numbers.dedup();

    let first_section = numbers.first().copied();

    let links = match book_type {
        BookType::Novel => SectionLinks::Chapters(
            numbers.iter().map(|n| by_number[n].id).collect(),
        ),
        BookType::Collection => SectionLinks::Stories(
            numbers.iter().map(|n| by_number[n].title.clone()).collect(),
        ),
    };

    let entity = Entity {
        id: EntityId::new(),
        kind: draft.kind,
        name: draft.name,
        description: draft.description,
        links,
        position: BoardPosition::default(),
        starred: false,
        folder: None,
    };

    (first_section, entity)
}
