//! Placement reconciliation and overlap detection.
//!
//! `ensure_placements` runs on every read of the editor's layout, so it must
//! be pure and deterministic: identical input yields identical output, and
//! running it twice changes nothing. Overlaps are never resolved here, only
//! reported by [`collisions`].

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::collections::HashSet;

use crate::doc::{Cell, Table, TablePlacement, TablesLayout};

/// Return a layout in which every table in `tables` has exactly one placement.
///
/// Existing placements for known tables are kept unchanged and in order.
/// Placements for unknown tables, and repeat placements for a table, are
/// dropped. Tables without a placement get the first free origin cell in
/// row-major order, or (1,1) when the grid is full.
#[must_use]
pub fn ensure_placements(tables: &[Table], layout: &TablesLayout) -> TablesLayout {
    let known: HashSet<&str> = tables.iter().map(|t| t.id.as_str()).collect();
    let mut placed: HashSet<&str> = HashSet::with_capacity(tables.len());
    let mut placements: Vec<TablePlacement> = Vec::with_capacity(tables.len());

    for p in &layout.placements {
        if known.contains(p.table_id.as_str()) && placed.insert(p.table_id.as_str()) {
            placements.push(p.clone());
        }
    }

    let mut occupied: HashSet<Cell> = placements.iter().map(TablePlacement::origin).collect();
    for table in tables {
        if !placed.insert(table.id.as_str()) {
            continue;
        }
        let cell = first_free_cell(layout.column_count(), layout.row_count(), &occupied).unwrap_or(Cell::new(1, 1));
        occupied.insert(cell);
        placements.push(TablePlacement::at(table.id.clone(), cell));
    }

    TablesLayout { columns: layout.columns, rows: layout.rows, placements }
}

fn first_free_cell(columns: u32, rows: u32, occupied: &HashSet<Cell>) -> Option<Cell> {
    (1..=rows)
        .flat_map(|y| (1..=columns).map(move |x| Cell::new(x, y)))
        .find(|cell| !occupied.contains(cell))
}

/// Origin cells shared by two or more placements, in first-seen order.
#[must_use]
pub fn collisions(layout: &TablesLayout) -> Vec<Cell> {
    let mut seen: HashSet<Cell> = HashSet::with_capacity(layout.placements.len());
    let mut reported: HashSet<Cell> = HashSet::new();
    let mut out = Vec::new();
    for p in &layout.placements {
        let cell = p.origin();
        if !seen.insert(cell) && reported.insert(cell) {
            out.push(cell);
        }
    }
    out
}

/// Whether any two placements share an origin cell.
#[must_use]
pub fn has_collisions(layout: &TablesLayout) -> bool {
    let mut seen: HashSet<Cell> = HashSet::with_capacity(layout.placements.len());
    layout.placements.iter().any(|p| !seen.insert(p.origin()))
}
