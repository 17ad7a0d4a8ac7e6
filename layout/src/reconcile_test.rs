use super::*;

// =============================================================
// Helpers
// =============================================================

fn table(id: &str) -> Table {
    Table { id: id.to_owned(), code: id.to_uppercase(), name: format!("Table {id}"), capacity: Some(4), enabled: true }
}

fn tables(ids: &[&str]) -> Vec<Table> {
    ids.iter().map(|id| table(id)).collect()
}

fn placed(id: &str, x: u32, y: u32) -> TablePlacement {
    TablePlacement::at(id, Cell::new(x, y))
}

fn layout_with(columns: u32, rows: u32, placements: Vec<TablePlacement>) -> TablesLayout {
    TablesLayout { columns, rows, placements }
}

fn ids(layout: &TablesLayout) -> Vec<&str> {
    layout.placements.iter().map(|p| p.table_id.as_str()).collect()
}

// =============================================================
// ensure_placements: coverage
// =============================================================

#[test]
fn empty_tables_yield_empty_placements() {
    let out = ensure_placements(&[], &TablesLayout::new(4, 4));
    assert!(out.placements.is_empty());
    assert_eq!((out.columns, out.rows), (4, 4));
}

#[test]
fn first_table_lands_at_origin() {
    let out = ensure_placements(&tables(&["a"]), &TablesLayout::new(4, 4));
    assert_eq!(out.placements, vec![placed("a", 1, 1)]);
}

#[test]
fn new_tables_fill_row_major() {
    let out = ensure_placements(&tables(&["a", "b", "c", "d"]), &TablesLayout::new(3, 3));
    let cells: Vec<Cell> = out.placements.iter().map(TablePlacement::origin).collect();
    assert_eq!(cells, vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1), Cell::new(1, 2)]);
}

#[test]
fn new_tables_skip_occupied_cells() {
    let layout = layout_with(3, 3, vec![placed("a", 1, 1), placed("b", 3, 1)]);
    let out = ensure_placements(&tables(&["a", "b", "c"]), &layout);
    assert_eq!(out.placement("c"), Some(&placed("c", 2, 1)));
}

#[test]
fn id_set_matches_tables() {
    let layout = layout_with(4, 4, vec![placed("b", 2, 2), placed("gone", 1, 1)]);
    let ts = tables(&["a", "b", "c"]);
    let out = ensure_placements(&ts, &layout);
    let mut got = ids(&out);
    got.sort_unstable();
    assert_eq!(got, vec!["a", "b", "c"]);
}

#[test]
fn stale_placements_are_dropped_and_free_their_cell() {
    let layout = layout_with(2, 1, vec![placed("gone", 1, 1)]);
    let out = ensure_placements(&tables(&["a"]), &layout);
    assert_eq!(out.placements, vec![placed("a", 1, 1)]);
}

#[test]
fn duplicate_placements_keep_the_first() {
    let layout = layout_with(4, 4, vec![placed("a", 2, 3), placed("a", 4, 4)]);
    let out = ensure_placements(&tables(&["a"]), &layout);
    assert_eq!(out.placements, vec![placed("a", 2, 3)]);
}

// =============================================================
// ensure_placements: preservation
// =============================================================

#[test]
fn existing_placements_are_preserved_exactly() {
    let wide = TablePlacement { table_id: "b".into(), x: 3, y: 2, w: 2, h: 3 };
    let layout = layout_with(6, 6, vec![placed("a", 5, 5), wide.clone()]);
    let out = ensure_placements(&tables(&["a", "b", "c"]), &layout);
    assert_eq!(out.placement("a"), Some(&placed("a", 5, 5)));
    assert_eq!(out.placement("b"), Some(&wide));
}

#[test]
fn existing_order_comes_before_new_tables() {
    let layout = layout_with(4, 4, vec![placed("c", 4, 4), placed("a", 3, 3)]);
    let out = ensure_placements(&tables(&["a", "b", "c", "d"]), &layout);
    assert_eq!(ids(&out), vec!["c", "a", "b", "d"]);
}

#[test]
fn out_of_range_placements_are_kept_as_is() {
    let layout = layout_with(2, 2, vec![placed("a", 9, 9)]);
    let out = ensure_placements(&tables(&["a"]), &layout);
    assert_eq!(out.placements, vec![placed("a", 9, 9)]);
}

// =============================================================
// ensure_placements: full grid and degenerate dims
// =============================================================

#[test]
fn full_grid_falls_back_to_origin() {
    let layout = layout_with(2, 1, vec![placed("a", 1, 1), placed("b", 2, 1)]);
    let out = ensure_placements(&tables(&["a", "b", "c"]), &layout);
    assert_eq!(out.placement("c"), Some(&placed("c", 1, 1)));
    assert!(has_collisions(&out));
}

#[test]
fn zero_sized_grid_behaves_as_single_cell() {
    let out = ensure_placements(&tables(&["a", "b"]), &TablesLayout::new(0, 0));
    assert_eq!(out.placements, vec![placed("a", 1, 1), placed("b", 1, 1)]);
    assert_eq!((out.columns, out.rows), (0, 0));
}

// =============================================================
// ensure_placements: determinism
// =============================================================

#[test]
fn idempotent() {
    let ts = tables(&["a", "b", "c", "d", "e"]);
    let layout = layout_with(3, 2, vec![placed("d", 2, 1), placed("zzz", 1, 1)]);
    let once = ensure_placements(&ts, &layout);
    let twice = ensure_placements(&ts, &once);
    assert_eq!(once, twice);
}

#[test]
fn deterministic_for_identical_input() {
    let ts = tables(&["t1", "t2", "t3", "t4", "t5", "t6", "t7"]);
    let layout = layout_with(4, 3, vec![placed("t4", 1, 1), placed("t6", 3, 2)]);
    let a = ensure_placements(&ts, &layout);
    for _ in 0..20 {
        assert_eq!(ensure_placements(&ts, &layout), a);
    }
}

#[test]
fn fresh_output_has_no_collisions() {
    let ts = tables(&["a", "b", "c", "d", "e", "f"]);
    let layout = layout_with(3, 3, vec![placed("b", 1, 1), placed("e", 2, 2)]);
    assert!(!has_collisions(&ensure_placements(&ts, &layout)));
}

// =============================================================
// collisions
// =============================================================

#[test]
fn collisions_empty_layout() {
    let layout = TablesLayout::new(3, 3);
    assert!(collisions(&layout).is_empty());
    assert!(!has_collisions(&layout));
}

#[test]
fn collisions_detect_shared_origin() {
    let layout = layout_with(3, 3, vec![placed("a", 2, 2), placed("b", 1, 1), placed("c", 2, 2)]);
    assert_eq!(collisions(&layout), vec![Cell::new(2, 2)]);
    assert!(has_collisions(&layout));
}

#[test]
fn collisions_report_each_cell_once() {
    let layout = layout_with(
        3,
        3,
        vec![placed("a", 1, 1), placed("b", 1, 1), placed("c", 1, 1), placed("d", 3, 3), placed("e", 3, 3)],
    );
    assert_eq!(collisions(&layout), vec![Cell::new(1, 1), Cell::new(3, 3)]);
}

#[test]
fn collisions_ignore_span_overlap() {
    let wide = TablePlacement { table_id: "a".into(), x: 1, y: 1, w: 2, h: 2 };
    let layout = layout_with(3, 3, vec![wide, placed("b", 2, 2)]);
    assert!(!has_collisions(&layout));
}
