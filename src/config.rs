//! Host configuration parsed from environment variables.
//!
//! Optional:
//! - `FLOORPLAN_FILE`: snapshot file path, default `floorplan.json`
//! - `FLOORPLAN_GRID_COLUMNS`: grid width for a new file, default 8
//! - `FLOORPLAN_GRID_ROWS`: grid height for a new file, default 6
//! - `FLOORPLAN_CELL_PX`: cell size used to synthesize drag gestures, default 80
//! - `FLOORPLAN_LOG`: tracing filter, default `info`

use std::path::PathBuf;

use layout::consts::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS};

pub const DEFAULT_FILE: &str = "floorplan.json";
pub const DEFAULT_CELL_PX: f64 = 80.0;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: PathBuf,
    pub grid_columns: u32,
    pub grid_rows: u32,
    pub cell_px: f64,
    pub log_filter: String,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        let cell_px = env_parse("FLOORPLAN_CELL_PX", DEFAULT_CELL_PX);
        Self {
            file: std::env::var("FLOORPLAN_FILE").map_or_else(|_| PathBuf::from(DEFAULT_FILE), PathBuf::from),
            grid_columns: env_parse("FLOORPLAN_GRID_COLUMNS", DEFAULT_GRID_COLUMNS).max(1),
            grid_rows: env_parse("FLOORPLAN_GRID_ROWS", DEFAULT_GRID_ROWS).max(1),
            cell_px: if cell_px.is_finite() && cell_px > 0.0 { cell_px } else { DEFAULT_CELL_PX },
            log_filter: std::env::var("FLOORPLAN_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
