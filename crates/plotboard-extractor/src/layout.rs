//! Board layout - deterministic, non-overlapping placement
//!
//! Batches from an extraction run go into a fixed-width grid in row-major
//! order. Single manual additions instead scan for the first free cell,
//! bounded by a maximum number of candidates.

use plotboard_domain::{BoardPosition, Entity};

/// Number of grid columns for batch placement
pub const GRID_COLUMNS: usize = 4;

/// Grid cell width in board units
pub const CELL_WIDTH: f64 = 260.0;

/// Grid cell height in board units
pub const CELL_HEIGHT: f64 = 180.0;

/// Horizontal origin of the grid
pub const GRID_ORIGIN_X: f64 = 80.0;

/// Vertical origin of the grid
pub const GRID_ORIGIN_Y: f64 = 80.0;

/// Candidate limit for the free-cell scan; the last candidate is accepted
/// regardless of overlap once the limit is reached
const MAX_PLACEMENT_SCANS: usize = 400;

/// Position of the i-th cell in row-major grid order
fn grid_cell(i: usize) -> BoardPosition {
    BoardPosition::new(
        GRID_ORIGIN_X + (i % GRID_COLUMNS) as f64 * CELL_WIDTH,
        GRID_ORIGIN_Y + (i / GRID_COLUMNS) as f64 * CELL_HEIGHT,
    )
}

/// Assign grid positions to a freshly reconciled batch
///
/// The i-th entity lands in the i-th cell; a batch never reuses a cell, so
/// no two entities in it can overlap.
pub fn place_batch(mut entities: Vec<Entity>) -> Vec<Entity> {
    for (i, entity) in entities.iter_mut().enumerate() {
        entity.position = grid_cell(i);
    }
    entities
}

/// Find a free position for a single manually-added entity
///
/// Scans grid cells left-to-right, top-to-bottom, skipping candidates whose
/// bounding box overlaps an existing entity. Bounded by a scan limit, after
/// which the last candidate is accepted even if it overlaps.
pub fn next_free_position(existing: &[BoardPosition]) -> BoardPosition {
    for i in 0..MAX_PLACEMENT_SCANS {
        let candidate = grid_cell(i);
        if !existing.iter().any(|pos| overlaps(candidate, *pos)) {
            return candidate;
        }
    }
    grid_cell(MAX_PLACEMENT_SCANS - 1)
}

/// Bounding-box overlap test: both axis distances under the cell dimensions
fn overlaps(a: BoardPosition, b: BoardPosition) -> bool {
    (a.x - b.x).abs() < CELL_WIDTH && (a.y - b.y).abs() < CELL_HEIGHT
}
