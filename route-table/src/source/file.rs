//! JSON file of location rows.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::SourceError;
use crate::domain::Row;

/// A row collection stored as a JSON array.
#[derive(Debug, Clone)]
pub struct RowFile {
    path: PathBuf,
}

impl RowFile {
    /// Refer to the row file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load every row from the file.
    pub fn load(&self) -> Result<Vec<Row>, SourceError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let rows: Vec<Row> = serde_json::from_str(&contents).map_err(|e| SourceError::Json {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), rows = rows.len(), "loaded rows");
        Ok(rows)
    }

    /// Write `rows` to the file, replacing its contents.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, rows: &[Row]) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| SourceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(rows).map_err(|e| SourceError::Json {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
