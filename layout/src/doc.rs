//! Document model: tables, their grid placements, and the layout record.
//!
//! This module defines the data that an editing session works on (`Table`,
//! `TablePlacement`, `TablesLayout`) and the `TablesSnapshot` pair that is
//! handed to change listeners and save handlers. The wire shape matches the
//! upstream API: placements are keyed by table id, and `w`/`h` default to a
//! single cell when absent.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS};

/// Unique identifier for a table. Opaque to the editor.
pub type TableId = String;

/// A seating unit on the floor plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier for this table.
    pub id: TableId,
    /// Short label shown on the grid (e.g. `"M3"`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Seating capacity; `None` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Disabled tables stay on the plan but are not offered for new orders.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_span() -> u32 {
    1
}

/// A 1-based grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column, starting at 1.
    pub x: u32,
    /// Row, starting at 1.
    pub y: u32,
}

impl Cell {
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// The spatial assignment of one table to a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlacement {
    /// The table this placement belongs to.
    pub table_id: TableId,
    /// Origin column, 1-based.
    pub x: u32,
    /// Origin row, 1-based.
    pub y: u32,
    /// Width in cells.
    #[serde(default = "default_span")]
    pub w: u32,
    /// Height in cells.
    #[serde(default = "default_span")]
    pub h: u32,
}

impl TablePlacement {
    /// A single-cell placement at `cell`.
    #[must_use]
    pub fn at(table_id: impl Into<TableId>, cell: Cell) -> Self {
        Self { table_id: table_id.into(), x: cell.x, y: cell.y, w: 1, h: 1 }
    }

    /// The origin cell of this placement.
    #[must_use]
    pub fn origin(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// Grid dimensions plus the placements on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesLayout {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Placements, at most one per table.
    #[serde(default)]
    pub placements: Vec<TablePlacement>,
}

impl TablesLayout {
    /// An empty layout with the given grid dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows, placements: Vec::new() }
    }

    /// Column count, never below 1.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.columns.max(1)
    }

    /// Row count, never below 1.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.rows.max(1)
    }

    /// The placement for `table_id`, if any.
    #[must_use]
    pub fn placement(&self, table_id: &str) -> Option<&TablePlacement> {
        self.placements.iter().find(|p| p.table_id == table_id)
    }

    /// Mutable access to the placement for `table_id`, if any.
    pub fn placement_mut(&mut self, table_id: &str) -> Option<&mut TablePlacement> {
        self.placements.iter_mut().find(|p| p.table_id == table_id)
    }

    /// Drop the placement for `table_id`. Returns it if it was present.
    pub fn remove_placement(&mut self, table_id: &str) -> Option<TablePlacement> {
        let idx = self.placements.iter().position(|p| p.table_id == table_id)?;
        Some(self.placements.remove(idx))
    }
}

impl Default for TablesLayout {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS)
    }
}

/// The `{tables, layout}` pair passed to change listeners and save handlers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TablesSnapshot {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub layout: TablesLayout,
}

impl TablesSnapshot {
    #[must_use]
    pub fn new(tables: Vec<Table>, layout: TablesLayout) -> Self {
        Self { tables, layout }
    }

    /// Find a table by id, falling back to a case-insensitive code match.
    #[must_use]
    pub fn find_table(&self, key: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.id == key)
            .or_else(|| self.tables.iter().find(|t| t.code.eq_ignore_ascii_case(key)))
    }
}
