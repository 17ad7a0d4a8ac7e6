//! Table-layout editor model for the restaurant floor plan.
//!
//! This crate is UI-toolkit agnostic. It owns the full lifecycle of a layout
//! editing session: translating pointer and keyboard events into placement
//! changes, snapping pointer positions onto the grid, keeping every table
//! placed, editing table attributes, and handing the finished snapshot to an
//! injected save handler. The host layer (browser bridge, desktop shell, or
//! the `floorplan` CLI) is responsible only for wiring events to the editor
//! and reacting to the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EditorCore`]: gestures, field edits, dirty tracking |
//! | [`persist`] | [`persist::Editor`] wrapper, save handler seam, save/reset |
//! | [`doc`] | Tables, placements, layouts and snapshots |
//! | [`grid`] | Cell sizing and pointer-to-cell snapping |
//! | [`reconcile`] | Placement assignment and overlap detection |
//! | [`input`] | Input event types and the drag state machine |
//! | [`consts`] | Shared limits, defaults and user-facing messages |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod input;
pub mod persist;
pub mod reconcile;
