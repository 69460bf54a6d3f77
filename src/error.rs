//! Error types for merge operations.
//!
//! The merge operation knows exactly three failure kinds: too few inputs,
//! an input without a usable temp path, and whatever the PDF layer reports
//! while loading, concatenating or writing. Failed deletes of temporary files
//! are never represented here; they are logged where they happen.

use std::io;

/// Result type alias for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Error raised by the merge operation.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Fewer than [`MIN_MERGE_FILES`](crate::MIN_MERGE_FILES) inputs were supplied.
    #[error("At least two files are required for merging.")]
    InsufficientFiles,

    /// An uploaded file has no temporary path to read from.
    #[error("File {filename} is missing a temporary path.")]
    MissingPath {
        /// Client-supplied filename, or `unknown`.
        filename: String,
    },

    /// Failure surfaced by the PDF layer, message passed through unmodified.
    #[error("{0}")]
    Pdf(String),

    /// I/O failure while reading inputs or writing the output.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<lopdf::Error> for MergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

impl MergeError {
    /// Create a MissingPath error for the given client filename.
    pub fn missing_path(filename: Option<&str>) -> Self {
        Self::MissingPath {
            filename: filename.unwrap_or("unknown").to_string(),
        }
    }

    /// Check if this error was raised before any merge work started.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InsufficientFiles | Self::MissingPath { .. })
    }
}
