//! CLI over the layout editor.
//!
//! Each invocation loads the committed snapshot, replays one command through
//! the same gestures a pointer-driven host would send (a `move` is a synthetic
//! drag onto the target cell), and saves through the file store when the
//! session ends dirty.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use layout::doc::{Cell, TablesLayout, TablesSnapshot};
use layout::engine::EditorCore;
use layout::grid::{Bounds, GridSize, cell_center};
use layout::persist::{Editor, SaveOutcome};
use layout::reconcile::collisions;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::store::{FileStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no table with id or code `{0}`")]
    UnknownTable(String),
    #[error("save failed: {0}")]
    SaveFailed(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Restaurant table layout editor")]
pub struct Cli {
    /// Layout snapshot file.
    #[arg(long, env = "FLOORPLAN_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the grid and the table list.
    Show {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Append tables with default attributes.
    Add {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Drag a table onto a cell.
    Move { table: String, col: u32, row: u32 },
    /// Edit a table's attributes.
    Set(SetArgs),
    /// Delete a table and its placement.
    Remove { table: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SetArgs {
    /// Table id or code.
    pub table: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    /// Seats; anything but a positive integer clears it.
    #[arg(long)]
    pub capacity: Option<String>,
    #[arg(long, default_value_t = false, conflicts_with = "disabled")]
    pub enabled: bool,
    #[arg(long, default_value_t = false)]
    pub disabled: bool,
}

/// Machine-readable `show --json` output.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    #[serde(flatten)]
    snapshot: &'a TablesSnapshot,
    overlaps: Vec<[u32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'static str>,
}

pub async fn run(cli: Cli, config: &Config) -> Result<(), CliError> {
    let store = FileStore::new(cli.file.clone().unwrap_or_else(|| config.file.clone()));
    let committed = store.load(TablesLayout::new(config.grid_columns, config.grid_rows)).await?;
    info!(path = %store.path().display(), tables = committed.tables.len(), "layout loaded");

    let editor = Editor::with_handler(committed.tables, committed.layout, Arc::new(store));
    let note = apply(&editor, &cli.command, config.cell_px).await?;
    commit(&editor).await?;

    let core = editor.read().await;
    let json = matches!(cli.command, Command::Show { json: true });
    print!("{}", render_output(&core, note.as_deref(), json)?);
    Ok(())
}

/// Everything printed after a command.
///
/// The note is printed only when the save cleared it from the editor status;
/// otherwise `render_plan` already shows it.
pub fn render_output(core: &EditorCore, note: Option<&str>, json: bool) -> Result<String, CliError> {
    let mut out = String::new();
    if let Some(note) = note.filter(|n| core.status() != Some(*n)) {
        out.push_str(&format!("! {note}\n"));
    }
    if json {
        out.push_str(&render_json(core)?);
        out.push('\n');
    } else {
        out.push_str(&render_plan(core));
    }
    Ok(out)
}

/// Replay one command against the editor.
///
/// Returns the status line the command left behind (e.g. the table limit),
/// which a following save would otherwise clear.
pub async fn apply(editor: &Editor, command: &Command, cell_px: f64) -> Result<Option<String>, CliError> {
    let mut core = editor.write().await;
    match command {
        Command::Show { .. } => {}
        Command::Add { count } => {
            for _ in 0..*count {
                if core.add_table().is_empty() {
                    break;
                }
            }
        }
        Command::Move { table, col, row } => {
            let id = resolve(&core, table)?;
            let grid = GridSize::from(&core.layout());
            let bounds = Bounds::new(f64::from(grid.columns) * cell_px, f64::from(grid.rows) * cell_px);
            core.on_pointer_down(&id);
            core.on_pointer_move(cell_center(Cell::new(*col, *row), bounds, grid), bounds);
            core.on_pointer_up();
        }
        Command::Set(args) => {
            let id = resolve(&core, &args.table)?;
            core.select(&id);
            if let Some(name) = &args.name {
                core.rename_selected(name);
            }
            if let Some(code) = &args.code {
                core.recode_selected(code);
            }
            if let Some(capacity) = &args.capacity {
                core.set_selected_capacity(capacity);
            }
            if args.enabled {
                core.set_selected_enabled(true);
            } else if args.disabled {
                core.set_selected_enabled(false);
            }
        }
        Command::Remove { table } => {
            let id = resolve(&core, table)?;
            core.select(&id);
            core.delete_selected();
        }
    }
    Ok(core.status().map(str::to_owned))
}

/// Save if the command left unsaved edits.
pub async fn commit(editor: &Editor) -> Result<(), CliError> {
    match editor.save().await {
        SaveOutcome::Saved | SaveOutcome::Skipped => Ok(()),
        SaveOutcome::Failed(message) => Err(CliError::SaveFailed(message)),
    }
}

fn resolve(core: &EditorCore, key: &str) -> Result<String, CliError> {
    core.snapshot()
        .find_table(key)
        .map(|t| t.id.clone())
        .ok_or_else(|| CliError::UnknownTable(key.to_owned()))
}

/// Text rendering: the grid with table codes, then one line per table.
#[must_use]
pub fn render_plan(core: &EditorCore) -> String {
    let layout = core.layout();
    let overlaps = collisions(&layout);
    let mut lines: Vec<String> = Vec::new();

    for y in 1..=layout.row_count() {
        let row: String = (1..=layout.column_count())
            .map(|x| {
                let cell = Cell::new(x, y);
                if overlaps.contains(&cell) {
                    return format!("{:<5}", "*");
                }
                let code = layout
                    .placements
                    .iter()
                    .find(|p| p.origin() == cell)
                    .and_then(|p| core.table(&p.table_id))
                    .map_or(".", |t| t.code.as_str());
                format!("{code:<5}")
            })
            .collect();
        lines.push(row.trim_end().to_owned());
    }

    for t in core.tables() {
        let at = layout.placement(&t.id).map_or_else(String::new, |p| format!("({},{})", p.x, p.y));
        let seats = t.capacity.map_or_else(|| "-".to_owned(), |c| c.to_string());
        let state = if t.enabled { "" } else { " disabled" };
        lines.push(format!("{:<5} {:<20} seats {:<3} {at}{state}", t.code, t.name, seats));
    }

    for note in [core.overlap_warning(), core.status(), core.error()].into_iter().flatten() {
        lines.push(format!("! {note}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// JSON rendering for scripts.
pub fn render_json(core: &EditorCore) -> Result<String, serde_json::Error> {
    let snapshot = core.snapshot();
    let overlaps = collisions(&snapshot.layout).into_iter().map(|c| [c.x, c.y]).collect();
    let report = PlanReport { snapshot: &snapshot, overlaps, warning: core.overlap_warning() };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
