//! File store: the host's upstream for layout snapshots.
//!
//! DESIGN
//! ======
//! One JSON file holds the committed `{tables, layout}` snapshot. Saves write
//! a sibling temp file and rename it over the target, so a crash mid-write
//! never leaves a truncated layout behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use layout::doc::{TablesLayout, TablesSnapshot};
use layout::persist::{SaveError, SaveHandler};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid layout file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// JSON file persistence for one floor plan.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the committed snapshot. A missing file is an empty plan on `empty_layout`.
    pub async fn load(&self, empty_layout: TablesLayout) -> Result<TablesSnapshot, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no layout file yet; starting empty");
                return Ok(TablesSnapshot::new(Vec::new(), empty_layout));
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };
        let snapshot: TablesSnapshot =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), tables = snapshot.tables.len(), "layout file loaded");
        Ok(snapshot)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self.path.file_name().map_or_else(|| DEFAULT_TEMP_STEM.into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
    }
}

const DEFAULT_TEMP_STEM: &str = "floorplan";

#[async_trait]
impl SaveHandler for FileStore {
    async fn save(&self, snapshot: TablesSnapshot) -> Result<(), SaveError> {
        let mut body = serde_json::to_vec_pretty(&snapshot)?;
        body.push(b'\n');

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            // PHASE: best-effort cleanup; the rename error is what the user sees.
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                debug!(error = %cleanup, path = %tmp.display(), "temp file cleanup failed");
            }
            return Err(e.into());
        }
        debug!(path = %self.path.display(), bytes = body.len(), "layout file written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
