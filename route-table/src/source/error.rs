//! Row source error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing a row file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a JSON array of rows
    #[error("JSON error in {path}: {message}")]
    Json { path: PathBuf, message: String },
}
