//! Shared constants for the layout crate.

// ── Limits ──────────────────────────────────────────────────────

/// Maximum number of tables a single layout may hold.
pub const MAX_TABLES: usize = 40;

// ── Defaults ────────────────────────────────────────────────────

/// Seating capacity given to newly added tables.
pub const DEFAULT_CAPACITY: u32 = 4;

/// Grid width used when no layout has been supplied.
pub const DEFAULT_GRID_COLUMNS: u32 = 8;

/// Grid height used when no layout has been supplied.
pub const DEFAULT_GRID_ROWS: u32 = 6;

/// Prefix for generated table codes (`M1`, `M2`, ...).
pub const TABLE_CODE_PREFIX: &str = "M";

/// Prefix for generated table names (`Mesa 1`, `Mesa 2`, ...).
pub const TABLE_NAME_PREFIX: &str = "Mesa";

// ── Messages ────────────────────────────────────────────────────

/// Status shown when an add is refused at [`MAX_TABLES`].
pub const MSG_TABLE_LIMIT: &str = "Se alcanzó el máximo de 40 mesas";

/// Transient status shown after a successful save.
pub const MSG_SAVED: &str = "Disposición guardada";

/// Error shown when a failed save carries no message of its own.
pub const MSG_SAVE_FAILED: &str = "No se pudo guardar la disposición de mesas";

/// Warning banner shown while two placements share an origin cell.
pub const MSG_OVERLAP: &str = "Hay mesas superpuestas";

/// Prefix for save errors raised while writing the layout.
pub const MSG_WRITE_FAILED: &str = "No se pudo escribir la disposición";

/// Prefix for save errors raised while encoding the layout.
pub const MSG_ENCODE_FAILED: &str = "No se pudo codificar la disposición";
