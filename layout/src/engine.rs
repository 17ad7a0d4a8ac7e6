use tracing::{debug, warn};
use uuid::Uuid;

use crate::consts::{DEFAULT_CAPACITY, MAX_TABLES, MSG_OVERLAP, MSG_SAVED, MSG_TABLE_LIMIT, TABLE_CODE_PREFIX, TABLE_NAME_PREFIX};
use crate::doc::{Table, TableId, TablesLayout, TablesSnapshot};
use crate::grid::{Bounds, GridSize, Point, snap_to_cell};
use crate::input::{InputState, Key, Modifiers};
use crate::reconcile::{ensure_placements, has_collisions};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Local state changed; forward the snapshot to change listeners.
    Changed(TablesSnapshot),
    /// A drag began: bind global pointer listeners and suppress text selection.
    DragStarted { table_id: TableId },
    /// A drag ended: unbind global pointer listeners and restore text selection.
    DragEnded { table_id: TableId },
    /// Suppress the browser's default handling of the current key event.
    PreventDefault,
    /// The save shortcut was pressed.
    SaveRequested,
}

/// Where the editor stood when a save began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveStamp {
    /// Edit revision at the time the snapshot was taken.
    pub revision: u64,
    /// Bumped by every reset or reload; a save from an older session is stale.
    pub session: u64,
}

/// Bookkeeping for one in-flight save.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    /// The state handed to the save handler.
    pub snapshot: TablesSnapshot,
    pub stamp: SaveStamp,
}

/// Core editor state: everything except the save handler.
///
/// Separated from `Editor` so it can be driven synchronously in tests.
pub struct EditorCore {
    initial: TablesSnapshot,
    tables: Vec<Table>,
    layout: TablesLayout,
    selected_id: Option<TableId>,
    input: InputState,
    dirty: bool,
    revision: u64,
    session: u64,
    saving: bool,
    save_enabled: bool,
    status: Option<String>,
    error: Option<String>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(Vec::new(), TablesLayout::default())
    }
}

impl EditorCore {
    /// Start a session from an externally supplied snapshot.
    #[must_use]
    pub fn new(tables: Vec<Table>, layout: TablesLayout) -> Self {
        let mut core = Self {
            initial: TablesSnapshot::default(),
            tables: Vec::new(),
            layout: TablesLayout::default(),
            selected_id: None,
            input: InputState::Idle,
            dirty: false,
            revision: 0,
            session: 0,
            saving: false,
            save_enabled: false,
            status: None,
            error: None,
        };
        core.load_snapshot(tables, layout);
        core
    }

    // --- Data inputs ---

    /// Replace the session with a fresh snapshot, discarding all local edits.
    ///
    /// Tables beyond [`MAX_TABLES`] are dropped.
    pub fn load_snapshot(&mut self, mut tables: Vec<Table>, layout: TablesLayout) -> Vec<Action> {
        if tables.len() > MAX_TABLES {
            warn!(count = tables.len(), max = MAX_TABLES, "snapshot exceeds table limit; truncating");
            tables.truncate(MAX_TABLES);
        }
        self.initial = TablesSnapshot::new(tables, layout);
        self.restore_initial()
    }

    /// Discard local edits and restore the last supplied snapshot.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = self.restore_initial();
        actions.push(Action::Changed(self.snapshot()));
        actions
    }

    fn restore_initial(&mut self) -> Vec<Action> {
        let actions = self.end_drag();
        self.tables = self.initial.tables.clone();
        self.layout = self.initial.layout.clone();
        self.selected_id = self.tables.first().map(|t| t.id.clone());
        self.dirty = false;
        self.revision += 1;
        self.session += 1;
        self.status = None;
        self.error = None;
        actions
    }

    /// Enable or disable the save shortcut. Set by the owner of the save handler.
    pub fn set_save_enabled(&mut self, enabled: bool) {
        self.save_enabled = enabled;
    }

    // --- Queries ---

    /// Tables in display order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by id.
    #[must_use]
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// The layout with every table placed. Derived on each call.
    #[must_use]
    pub fn layout(&self) -> TablesLayout {
        ensure_placements(&self.tables, &self.layout)
    }

    /// The current `{tables, layout}` pair.
    #[must_use]
    pub fn snapshot(&self) -> TablesSnapshot {
        TablesSnapshot::new(self.tables.clone(), self.layout())
    }

    /// The last externally supplied snapshot.
    #[must_use]
    pub fn initial(&self) -> &TablesSnapshot {
        &self.initial
    }

    /// The currently selected table id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The currently selected table, if any.
    #[must_use]
    pub fn selected_table(&self) -> Option<&Table> {
        self.selection().and_then(|id| self.table(id))
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the save control should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.save_enabled && self.dirty && !self.saving
    }

    /// Informational status line (limit reached, saved), if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Last save error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Banner text while two tables share an origin cell.
    #[must_use]
    pub fn overlap_warning(&self) -> Option<&'static str> {
        has_collisions(&self.layout()).then_some(MSG_OVERLAP)
    }

    /// Expire the transient status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // --- Selection ---

    /// Select a table. Returns false if no table has this id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.table(id).is_none() {
            return false;
        }
        self.selected_id = Some(id.to_owned());
        true
    }

    // --- Drag gesture ---

    /// Pointer pressed over a table: select it and start dragging.
    pub fn on_pointer_down(&mut self, table_id: &str) -> Vec<Action> {
        if self.table(table_id).is_none() {
            return Vec::new();
        }
        let mut actions = self.end_drag();
        self.selected_id = Some(table_id.to_owned());
        self.input = InputState::Dragging { table_id: table_id.to_owned() };
        debug!(table_id, "table drag started");
        actions.push(Action::DragStarted { table_id: table_id.to_owned() });
        actions
    }

    /// Pointer moved anywhere. Only acts while dragging.
    ///
    /// `pointer` is relative to the grid container's top-left corner.
    pub fn on_pointer_move(&mut self, pointer: Point, bounds: Bounds) -> Vec<Action> {
        let Some(table_id) = self.input.dragged().map(str::to_owned) else {
            return Vec::new();
        };
        let cell = snap_to_cell(pointer, bounds, GridSize::from(&self.layout));
        self.layout = ensure_placements(&self.tables, &self.layout);
        let Some(placement) = self.layout.placement_mut(&table_id) else {
            return self.end_drag();
        };
        placement.x = cell.x;
        placement.y = cell.y;
        vec![self.touch()]
    }

    /// Pointer released anywhere: the drag ends where it last snapped.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    /// The host is going away. Ends any drag so text selection is restored.
    pub fn teardown(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    fn end_drag(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Dragging { table_id } => {
                debug!(table_id = %table_id, "table drag ended");
                vec![Action::DragEnded { table_id }]
            }
        }
    }

    // --- Keyboard ---

    /// Ctrl/Cmd+S requests a save when a save handler is attached.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.save_enabled && modifiers.command() && key.is_save() {
            return vec![Action::PreventDefault, Action::SaveRequested];
        }
        Vec::new()
    }

    // --- Table editing ---

    /// Append a new table with default attributes and place it.
    ///
    /// Refused with a status message once [`MAX_TABLES`] is reached.
    pub fn add_table(&mut self) -> Vec<Action> {
        if self.tables.len() >= MAX_TABLES {
            warn!(max = MAX_TABLES, "table limit reached; add refused");
            self.status = Some(MSG_TABLE_LIMIT.to_owned());
            return Vec::new();
        }
        let n = self.tables.len() + 1;
        let table = Table {
            id: Uuid::new_v4().to_string(),
            code: format!("{TABLE_CODE_PREFIX}{n}"),
            name: format!("{TABLE_NAME_PREFIX} {n}"),
            capacity: Some(DEFAULT_CAPACITY),
            enabled: true,
        };
        self.selected_id = Some(table.id.clone());
        self.tables.push(table);
        self.layout = ensure_placements(&self.tables, &self.layout);
        vec![self.touch()]
    }

    /// Remove the selected table and its placement.
    ///
    /// Selection falls back to the first remaining table.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.selected_id.take() else {
            return Vec::new();
        };
        let Some(idx) = self.tables.iter().position(|t| t.id == id) else {
            return Vec::new();
        };
        let mut actions = if self.input.dragged() == Some(id.as_str()) { self.end_drag() } else { Vec::new() };
        self.tables.remove(idx);
        self.layout.remove_placement(&id);
        self.selected_id = self.tables.first().map(|t| t.id.clone());
        actions.push(self.touch());
        actions
    }

    /// Set the selected table's display name.
    pub fn rename_selected(&mut self, name: &str) -> Vec<Action> {
        self.update_selected(|t| t.name = name.to_owned())
    }

    /// Set the selected table's short code.
    pub fn recode_selected(&mut self, code: &str) -> Vec<Action> {
        self.update_selected(|t| t.code = code.to_owned())
    }

    /// Set the selected table's capacity from raw field input.
    ///
    /// Anything that is not a positive integer clears the capacity.
    pub fn set_selected_capacity(&mut self, raw: &str) -> Vec<Action> {
        let capacity = parse_capacity(raw);
        self.update_selected(|t| t.capacity = capacity)
    }

    /// Enable or disable the selected table.
    pub fn set_selected_enabled(&mut self, enabled: bool) -> Vec<Action> {
        self.update_selected(|t| t.enabled = enabled)
    }

    /// Flip the selected table's enabled flag.
    pub fn toggle_selected_enabled(&mut self) -> Vec<Action> {
        self.update_selected(|t| t.enabled = !t.enabled)
    }

    fn update_selected<F>(&mut self, edit: F) -> Vec<Action>
    where
        F: FnOnce(&mut Table),
    {
        let Some(id) = self.selected_id.as_deref() else {
            return Vec::new();
        };
        let Some(table) = self.tables.iter_mut().find(|t| t.id == id) else {
            return Vec::new();
        };
        edit(table);
        vec![self.touch()]
    }

    fn touch(&mut self) -> Action {
        self.dirty = true;
        self.revision += 1;
        Action::Changed(self.snapshot())
    }

    // --- Save bookkeeping ---

    /// Start a save: clears status and error and captures the snapshot.
    ///
    /// Returns `None` when there is nothing to save or a save is already in flight.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if !self.dirty || self.saving {
            return None;
        }
        self.status = None;
        self.error = None;
        self.saving = true;
        let stamp = SaveStamp { revision: self.revision, session: self.session };
        Some(SaveTicket { snapshot: self.snapshot(), stamp })
    }

    /// A save started at `stamp` succeeded.
    ///
    /// Dirty is only cleared if nothing changed since the snapshot was taken.
    /// After a reset or reload the outcome belongs to a discarded session and
    /// only releases the in-flight slot.
    pub fn complete_save(&mut self, stamp: SaveStamp) {
        self.saving = false;
        if stamp.session != self.session {
            debug!(session = stamp.session, "stale save completed");
            return;
        }
        if self.revision == stamp.revision {
            self.dirty = false;
        }
        self.status = Some(MSG_SAVED.to_owned());
    }

    /// A save started at `stamp` failed. Local edits and the dirty flag are kept for retry.
    pub fn fail_save(&mut self, stamp: SaveStamp, message: String) {
        self.saving = false;
        if stamp.session != self.session {
            debug!(session = stamp.session, "stale save failed");
            return;
        }
        self.error = Some(message);
    }
}

/// Parse capacity field input. Empty, non-numeric or non-positive input is unset.
#[must_use]
pub fn parse_capacity(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(c) if c > 0 => Some(c),
        _ => None,
    }
}
