use layout::consts::{MAX_TABLES, MSG_OVERLAP, MSG_TABLE_LIMIT};
use layout::doc::{Table, TablePlacement};

use super::*;

const CELL_PX: f64 = 80.0;

// =============================================================================
// Fixtures
// =============================================================================

fn table(id: &str, code: &str) -> Table {
    Table { id: id.to_owned(), code: code.to_owned(), name: format!("Mesa {code}"), capacity: Some(4), enabled: true }
}

fn sample_editor() -> Editor {
    let tables = vec![table("a", "M1"), table("b", "M2")];
    let layout = TablesLayout {
        columns: 4,
        rows: 3,
        placements: vec![TablePlacement::at("a", Cell::new(1, 1)), TablePlacement::at("b", Cell::new(2, 1))],
    };
    Editor::new(tables, layout)
}

fn set_args(table: &str) -> SetArgs {
    SetArgs { table: table.to_owned(), ..SetArgs::default() }
}

async fn origin(editor: &Editor, id: &str) -> Option<Cell> {
    editor.read().await.layout().placement(id).map(TablePlacement::origin)
}

// =============================================================================
// apply
// =============================================================================

#[tokio::test]
async fn show_changes_nothing() {
    let editor = sample_editor();
    let note = apply(&editor, &Command::Show { json: false }, CELL_PX).await.unwrap();
    assert_eq!(note, None);
    assert!(!editor.read().await.is_dirty());
}

#[tokio::test]
async fn add_appends_tables() {
    let editor = sample_editor();
    apply(&editor, &Command::Add { count: 2 }, CELL_PX).await.unwrap();
    let core = editor.read().await;
    let codes: Vec<&str> = core.tables().iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["M1", "M2", "M3", "M4"]);
    assert!(core.is_dirty());
}

#[tokio::test]
async fn add_past_limit_reports_status() {
    let editor = sample_editor();
    let note = apply(&editor, &Command::Add { count: 100 }, CELL_PX).await.unwrap();
    assert_eq!(note.as_deref(), Some(MSG_TABLE_LIMIT));
    assert_eq!(editor.read().await.tables().len(), MAX_TABLES);
}

#[tokio::test]
async fn move_by_code_drags_to_cell() {
    let editor = sample_editor();
    let cmd = Command::Move { table: "m1".into(), col: 3, row: 2 };
    apply(&editor, &cmd, CELL_PX).await.unwrap();
    assert_eq!(origin(&editor, "a").await, Some(Cell::new(3, 2)));
    assert_eq!(origin(&editor, "b").await, Some(Cell::new(2, 1)));
    let core = editor.read().await;
    assert!(core.is_dirty());
    assert!(!core.input().is_dragging());
}

#[tokio::test]
async fn move_out_of_range_clamps() {
    let editor = sample_editor();
    apply(&editor, &Command::Move { table: "b".into(), col: 99, row: 0 }, CELL_PX).await.unwrap();
    assert_eq!(origin(&editor, "b").await, Some(Cell::new(4, 1)));
}

#[tokio::test]
async fn move_unknown_table_errors() {
    let editor = sample_editor();
    let err = apply(&editor, &Command::Move { table: "M9".into(), col: 1, row: 1 }, CELL_PX).await.unwrap_err();
    assert!(matches!(err, CliError::UnknownTable(ref key) if key == "M9"));
    assert!(!editor.read().await.is_dirty());
}

#[tokio::test]
async fn set_edits_fields() {
    let editor = sample_editor();
    let args = SetArgs {
        name: Some("Ventana".into()),
        code: Some("V1".into()),
        capacity: Some("six".into()),
        disabled: true,
        ..set_args("b")
    };
    apply(&editor, &Command::Set(args), CELL_PX).await.unwrap();
    let core = editor.read().await;
    let t = core.table("b").cloned().unwrap();
    assert_eq!(t.name, "Ventana");
    assert_eq!(t.code, "V1");
    assert_eq!(t.capacity, None);
    assert!(!t.enabled);
    assert_eq!(core.table("a").map(|t| t.name.as_str()), Some("Mesa M1"));
}

#[tokio::test]
async fn set_enabled_flag() {
    let editor = sample_editor();
    editor.write().await.set_selected_enabled(false);
    apply(&editor, &Command::Set(SetArgs { enabled: true, ..set_args("a") }), CELL_PX).await.unwrap();
    assert_eq!(editor.read().await.table("a").map(|t| t.enabled), Some(true));
}

#[tokio::test]
async fn remove_deletes_table() {
    let editor = sample_editor();
    apply(&editor, &Command::Remove { table: "M2".into() }, CELL_PX).await.unwrap();
    let core = editor.read().await;
    assert!(core.table("b").is_none());
    assert!(core.layout().placement("b").is_none());
}

// =============================================================================
// commit
// =============================================================================

#[tokio::test]
async fn commit_without_handler_is_ok() {
    let editor = sample_editor();
    apply(&editor, &Command::Add { count: 1 }, CELL_PX).await.unwrap();
    assert!(commit(&editor).await.is_ok());
}

// =============================================================================
// rendering
// =============================================================================

#[tokio::test]
async fn render_plan_shows_grid_and_tables() {
    let editor = sample_editor();
    let text = render_plan(&*editor.read().await);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "M1   M2   .    .");
    assert_eq!(lines[1], ".    .    .    .");
    assert!(lines[3].starts_with("M1"));
    assert!(lines[3].ends_with("(1,1)"));
    assert!(!text.contains(MSG_OVERLAP));
}

#[tokio::test]
async fn render_plan_marks_overlaps() {
    let editor = sample_editor();
    apply(&editor, &Command::Move { table: "b".into(), col: 1, row: 1 }, CELL_PX).await.unwrap();
    let text = render_plan(&*editor.read().await);
    assert!(text.starts_with('*'));
    assert!(text.contains(MSG_OVERLAP));
}

#[tokio::test]
async fn render_json_includes_overlaps() {
    let editor = sample_editor();
    apply(&editor, &Command::Move { table: "b".into(), col: 1, row: 1 }, CELL_PX).await.unwrap();
    let json = render_json(&*editor.read().await).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["overlaps"], serde_json::json!([[1, 1]]));
    assert_eq!(value["warning"], MSG_OVERLAP);
    assert_eq!(value["tables"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["layout"]["columns"], 4);
}

#[tokio::test]
async fn refused_add_prints_limit_once() {
    let editor = Editor::new(Vec::new(), TablesLayout::new(8, 6));
    apply(&editor, &Command::Add { count: MAX_TABLES }, CELL_PX).await.unwrap();
    editor.write().await.clear_status();
    commit(&editor).await.unwrap();

    let note = apply(&editor, &Command::Add { count: 1 }, CELL_PX).await.unwrap();
    commit(&editor).await.unwrap();
    let out = render_output(&*editor.read().await, note.as_deref(), false).unwrap();
    assert_eq!(out.matches(MSG_TABLE_LIMIT).count(), 1);
}

#[tokio::test]
async fn note_cleared_by_save_is_printed_first() {
    let editor = sample_editor();
    editor.write().await.rename_selected("x");
    let out = render_output(&*editor.read().await, Some(MSG_TABLE_LIMIT), false).unwrap();
    assert!(out.starts_with(&format!("! {MSG_TABLE_LIMIT}\n")));
    assert_eq!(out.matches(MSG_TABLE_LIMIT).count(), 1);
}

// =============================================================================
// CLI parsing
// =============================================================================

#[test]
fn cli_parses_move() {
    let cli = Cli::parse_from(["floorplan", "--file", "x.json", "move", "M3", "2", "5"]);
    assert_eq!(cli.file, Some(PathBuf::from("x.json")));
    assert!(matches!(cli.command, Command::Move { ref table, col: 2, row: 5 } if table == "M3"));
}

#[test]
fn cli_rejects_enabled_with_disabled() {
    let result = Cli::try_parse_from(["floorplan", "set", "M1", "--enabled", "--disabled"]);
    assert!(result.is_err());
}
