//! Row collection storage.
//!
//! Rows are kept as a JSON array of objects on disk. Loading is strict about
//! the file's shape but lenient about field types; see [`Row`](crate::domain::Row).

mod error;
mod file;

pub use error::SourceError;
pub use file::RowFile;
