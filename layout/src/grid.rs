//! Grid geometry: cell sizing and pointer-to-cell snapping.
//!
//! All positions are in container-relative pixels: the host subtracts the
//! container's top-left corner from the raw pointer coordinates before
//! calling in. Snapping is "sticky": the pointer only moves into a cell once
//! it crosses the midpoint between that cell and the previous one, which
//! keeps a table from jittering along a cell boundary.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::doc::{Cell, TablesLayout};

/// A point in container-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the grid container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Grid dimensions in cells. Zero is treated as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns: columns.max(1), rows: rows.max(1) }
    }
}

impl From<&TablesLayout> for GridSize {
    fn from(layout: &TablesLayout) -> Self {
        Self::new(layout.columns, layout.rows)
    }
}

/// Pixel width and height of one cell.
///
/// Degenerate containers (zero, negative or non-finite size) report a 1x1
/// pixel cell so callers never divide by zero.
#[must_use]
pub fn cell_size(bounds: Bounds, grid: GridSize) -> (f64, f64) {
    let grid = GridSize::new(grid.columns, grid.rows);
    let w = bounds.width / f64::from(grid.columns);
    let h = bounds.height / f64::from(grid.rows);
    (sanitize_extent(w), sanitize_extent(h))
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Snap a container-relative pointer position to a 1-based cell.
///
/// The result is always inside `[1, columns] x [1, rows]`.
#[must_use]
pub fn snap_to_cell(pointer: Point, bounds: Bounds, grid: GridSize) -> Cell {
    let grid = GridSize::new(grid.columns, grid.rows);
    let (cw, ch) = cell_size(bounds, grid);
    Cell::new(snap_axis(pointer.x, cw, grid.columns), snap_axis(pointer.y, ch, grid.rows))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn snap_axis(pos: f64, cell: f64, count: u32) -> u32 {
    let idx = (pos / cell).round();
    if !idx.is_finite() || idx < 1.0 {
        return 1;
    }
    if idx >= f64::from(count) {
        return count;
    }
    idx as u32
}

/// The middle of the pixel region that snaps to `cell`.
///
/// With sticky snapping that region is offset half a cell from the drawn
/// cell, so its middle is the drawn cell's right/bottom edge.
#[must_use]
pub fn cell_center(cell: Cell, bounds: Bounds, grid: GridSize) -> Point {
    let grid = GridSize::new(grid.columns, grid.rows);
    let (cw, ch) = cell_size(bounds, grid);
    let x = cell.x.clamp(1, grid.columns);
    let y = cell.y.clamp(1, grid.rows);
    Point::new(f64::from(x) * cw, f64::from(y) * ch)
}
