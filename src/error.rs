//! Application errors.

use std::path::PathBuf;

/// Enumerates application errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database file does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound {
        /// Path of the missing file.
        path: PathBuf,
    },

    /// The database file could not be read.
    #[error("While reading file {path:?}: {source}")]
    ReadInput {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: anyhow::Error,
    },

    /// The database file is not valid JSON or does not match the data model.
    #[error("In {path:?} while parsing data: {source}")]
    ParseInput {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: anyhow::Error,
    },

    /// The database file could not be written.
    #[error("While writing the file {path:?}: {source}")]
    WriteOutput {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: anyhow::Error,
    },
}

/// Result type of the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;
