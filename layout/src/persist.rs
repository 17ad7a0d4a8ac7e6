//! Persistence bridge: explicit save through an injected handler.
//!
//! DESIGN
//! ======
//! `Editor` shares its `EditorCore` behind an `Arc<RwLock<_>>` so the host can
//! keep dragging and editing while a save is awaiting. The lock is held only
//! to take the snapshot and to record the outcome, never across the handler
//! call. At most one save is in flight per editor.
//!
//! ERROR HANDLING
//! ==============
//! A failed save keeps the dirty flag and every local edit; the user retries
//! by saving again. The dirty flag is cleared only when no edit happened after
//! the snapshot was taken, so late edits still require a subsequent save.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::consts::{MSG_ENCODE_FAILED, MSG_SAVE_FAILED, MSG_WRITE_FAILED};
use crate::doc::{Table, TablesLayout, TablesSnapshot};
use crate::engine::{Action, EditorCore, SaveTicket};
use crate::input::{Key, Modifiers};

/// Error returned by a [`SaveHandler`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The upstream store refused the layout; the message is shown to the user.
    #[error("{0}")]
    Rejected(String),
    /// Writing the layout failed.
    #[error("{msg}: {0}", msg = MSG_WRITE_FAILED)]
    Io(#[from] std::io::Error),
    /// The layout could not be encoded.
    #[error("{msg}: {0}", msg = MSG_ENCODE_FAILED)]
    Serialize(#[from] serde_json::Error),
}

impl SaveError {
    /// Message for the inline error line, with a default when the error has none.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() { MSG_SAVE_FAILED.to_owned() } else { message }
    }
}

/// Persists a `{tables, layout}` snapshot upstream.
#[async_trait]
pub trait SaveHandler: Send + Sync {
    /// Store the snapshot. Errors are surfaced inline and leave edits intact.
    async fn save(&self, snapshot: TablesSnapshot) -> Result<(), SaveError>;
}

/// Result of [`Editor::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No handler, nothing dirty, or a save already in flight.
    Skipped,
    /// The handler accepted the snapshot.
    Saved,
    /// The handler failed; carries the message now shown to the user.
    Failed(String),
}

/// The layout editor: shared core state plus an optional save handler.
#[derive(Clone)]
pub struct Editor {
    core: Arc<RwLock<EditorCore>>,
    handler: Option<Arc<dyn SaveHandler>>,
}

impl Editor {
    /// An editor without persistence. Saving is a no-op.
    #[must_use]
    pub fn new(tables: Vec<Table>, layout: TablesLayout) -> Self {
        Self { core: Arc::new(RwLock::new(EditorCore::new(tables, layout))), handler: None }
    }

    /// An editor that saves through `handler`.
    #[must_use]
    pub fn with_handler(tables: Vec<Table>, layout: TablesLayout, handler: Arc<dyn SaveHandler>) -> Self {
        let mut core = EditorCore::new(tables, layout);
        core.set_save_enabled(true);
        Self { core: Arc::new(RwLock::new(core)), handler: Some(handler) }
    }

    /// Whether a save handler is attached.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Shared read access to the editor state.
    pub async fn read(&self) -> RwLockReadGuard<'_, EditorCore> {
        self.core.read().await
    }

    /// Exclusive access to the editor state for gestures and field edits.
    pub async fn write(&self) -> RwLockWriteGuard<'_, EditorCore> {
        self.core.write().await
    }

    /// Save the current snapshot if there are unsaved edits.
    pub async fn save(&self) -> SaveOutcome {
        let Some(handler) = self.handler.as_ref() else {
            return SaveOutcome::Skipped;
        };
        let Some(ticket) = self.core.write().await.begin_save() else {
            return SaveOutcome::Skipped;
        };

        let SaveTicket { snapshot, stamp } = ticket;
        let tables = snapshot.tables.len();
        match handler.save(snapshot).await {
            Ok(()) => {
                self.core.write().await.complete_save(stamp);
                info!(tables, revision = stamp.revision, "table layout saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %e, tables, "table layout save failed");
                self.core.write().await.fail_save(stamp, message.clone());
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Keyboard entry point. Ctrl/Cmd+S saves when a handler is attached.
    ///
    /// The returned actions include [`Action::PreventDefault`] whenever the
    /// shortcut was consumed, so the host can suppress the browser dialog.
    pub async fn on_key_down(&self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.write().await.on_key_down(key, modifiers);
        if actions.contains(&Action::SaveRequested) {
            self.save().await;
        }
        actions
    }

    /// Discard local edits and restore the last supplied snapshot.
    pub async fn reset(&self) -> Vec<Action> {
        self.core.write().await.reset()
    }

    /// Replace the session with a freshly fetched snapshot.
    pub async fn load_snapshot(&self, tables: Vec<Table>, layout: TablesLayout) -> Vec<Action> {
        self.core.write().await.load_snapshot(tables, layout)
    }

    /// Current `{tables, layout}` pair.
    pub async fn snapshot(&self) -> TablesSnapshot {
        self.core.read().await.snapshot()
    }
}
