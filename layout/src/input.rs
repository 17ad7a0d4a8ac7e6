//! Input model: modifier keys, keys, and the drag gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. The only gesture the layout editor knows is dragging a table;
//! while it is active the host keeps global pointer listeners bound and text
//! selection suppressed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::TableId;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows or Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"s"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the save shortcut key, ignoring case.
    #[must_use]
    pub fn is_save(&self) -> bool {
        self.0.eq_ignore_ascii_case("s")
    }
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging a table across the grid.
    Dragging {
        /// Id of the table being dragged.
        table_id: TableId,
    },
}

impl InputState {
    /// The table being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { table_id } => Some(table_id),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
